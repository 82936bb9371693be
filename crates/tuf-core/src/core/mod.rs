pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod fs;
pub(crate) mod relocate;
pub(crate) mod runtime;
pub(crate) mod state;
pub(crate) mod tooling;
pub(crate) mod workspace;
