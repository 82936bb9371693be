pub mod commands {
    pub const INIT: &str = "TUF101";
    pub const MV: &str = "TUF201";
    pub const VALIDATE: &str = "TUF301";
    pub const GENERIC: &str = "TUF000";
}

pub mod workspace {
    pub const NOT_A_DIRECTORY: &str = "TUF110";
    pub const DUPLICATE: &str = "TUF111";
    pub const IO_FAILURE: &str = "TUF120";
}

pub mod state {
    pub const ALREADY_EXISTS: &str = "TUF130";
    pub const MISSING: &str = "TUF131";
    pub const CORRUPT: &str = "TUF132";
    pub const IO_FAILURE: &str = "TUF133";
}

pub mod relocate {
    pub const INVALID_ADDRESS: &str = "TUF210";
    pub const INVALID_REQUEST: &str = "TUF211";
    pub const BLOCK_NOT_FOUND: &str = "TUF212";
    pub const PARSE_FAILURE: &str = "TUF213";
    pub const IO_FAILURE: &str = "TUF220";
}

pub mod integrity {
    pub const DRIFT: &str = "TUF310";
}
