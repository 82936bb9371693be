use crate::config::Config;
use crate::effects::{self, Effects, SharedEffects};
use crate::CommandGroup;

#[derive(Clone, Copy, Debug)]
pub struct CommandInfo {
    pub group: CommandGroup,
    pub name: &'static str,
}

impl CommandInfo {
    #[must_use]
    pub const fn new(group: CommandGroup, name: &'static str) -> Self {
        Self { group, name }
    }
}

/// Everything a command handler needs: resolved settings and the effects to run against.
pub struct CommandContext {
    config: Config,
    effects: SharedEffects,
}

impl CommandContext {
    #[must_use]
    pub fn new(config: Config, effects: SharedEffects) -> Self {
        Self { config, effects }
    }

    pub fn effects(&self) -> &dyn Effects {
        self.effects.as_ref()
    }

    pub fn fs(&self) -> &dyn effects::FileSystem {
        self.effects.fs()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlobalOptions;
    use crate::effects::SystemEffects;
    use std::path::Path;

    #[test]
    fn context_exposes_config_and_effects() {
        let global = GlobalOptions {
            state_file: Some("flag.state".into()),
        };
        let ctx = CommandContext::new(Config::from_env(&global), SystemEffects::shared());
        assert_eq!(ctx.config().state_file(), Path::new("flag.state"));
        assert!(ctx.fs().metadata(Path::new(".")).unwrap().is_dir());
    }
}
