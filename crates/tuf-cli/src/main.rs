use atty::Stream;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use tracing_subscriber::EnvFilter;
use tuf_core::{CommandContext, Config, GlobalOptions, LogMode, SystemEffects};

mod cli;
mod dispatch;
mod output;
mod style;

pub use cli::*;

use output::{emit_output, OutputOptions};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = TufCli::parse();
    let global = GlobalOptions {
        state_file: cli
            .state
            .as_ref()
            .map(|path| path.to_string_lossy().to_string()),
    };
    let config = Config::from_env(&global);
    init_tracing(config.log_mode(), cli.trace, cli.verbose);

    let ctx = CommandContext::new(config, SystemEffects::shared());
    let (info, outcome) =
        dispatch::dispatch_command(&ctx, &cli.command).map_err(|err| eyre!("{err:?}"))?;
    let opts = OutputOptions {
        quiet: cli.quiet,
        json: cli.json,
        no_color: cli.no_color,
    };
    let code = emit_output(&opts, info, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];

fn init_tracing(mode: LogMode, trace: bool, verbose: u8) {
    let base = match mode {
        LogMode::Ci => 1,
        LogMode::Development => 2,
    };
    let level = if trace {
        "trace"
    } else {
        LEVELS[(base + usize::from(verbose)).min(LEVELS.len() - 1)]
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("tuf={level},tuf_cli={level},tuf_core={level}"))
    });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!mode.is_ci() && atty::is(Stream::Stderr))
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
