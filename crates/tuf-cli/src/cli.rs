use std::path::PathBuf;

use clap::{value_parser, ArgAction, Args, Parser, Subcommand};

pub const TUF_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nGlobal options:\n{options}\n";

pub const TUF_BEFORE_HELP: &str = concat!(
    "tuf ",
    env!("CARGO_PKG_VERSION"),
    " – Terraform block mover\n\n",
    "\x1b[1;36mCommands\x1b[0m\n",
    "  init             Record the workspaces taking part in a migration (writes tuf.state).\n",
    "  mv               Move one module or resource block into another file.\n",
    "  validate         Check that recorded workspaces have not changed since init.\n",
);

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = TUF_BEFORE_HELP,
    help_template = TUF_HELP_TEMPLATE
)]
#[allow(clippy::struct_excessive_bools)]
pub struct TufCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging (-vv reaches trace)",
        global = true
    )]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[arg(
        long,
        value_name = "FILE",
        value_parser = value_parser!(PathBuf),
        help = "Migration state file (defaults to $TUF_STATE_FILE or ./tuf.state)",
        global = true
    )]
    pub state: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CommandGroupCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(
        about = "Record the workspaces taking part in a migration.",
        override_usage = "tuf init -w <DIR>[,<DIR>...] [--terraform-state-pull-command CMD] [--terraform-state-file NAME]",
        after_help = "Examples:\n  tuf init -w .,../network,../compute \\\n    --terraform-state-pull-command \"terraform state pull > state.tfstate\" \\\n    --terraform-state-file state.tfstate\n"
    )]
    Init(InitArgs),
    #[command(
        about = "Move one module or resource block into another file.",
        override_usage = "tuf mv <ADDRESS> (--from-file FILE | --from-dir DIR) (--to-file FILE | --to-dir DIR)",
        after_help = "Examples:\n  tuf mv aws_iam_role.eks --from-file main.tf --to-file ../iam/main.tf\n  tuf mv module.vpc --from-dir . --to-dir ../network\n"
    )]
    Mv(MvArgs),
    #[command(
        about = "Check that recorded workspaces have not changed since init.",
        after_help = "Examples:\n  tuf validate\n  tuf --json validate\n"
    )]
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[arg(
        short = 'w',
        long = "workspace",
        visible_alias = "workspaces",
        value_name = "DIR",
        value_delimiter = ',',
        action = ArgAction::Append,
        help = "Workspace directory (repeat or comma-separate for several)"
    )]
    pub workspaces: Vec<PathBuf>,
    #[arg(
        long,
        value_name = "CMD",
        default_value = "",
        help = "Command that pulls Terraform state inside each workspace"
    )]
    pub terraform_state_pull_command: String,
    #[arg(
        long,
        value_name = "NAME",
        default_value = "terraform.tfstate",
        help = "File the pull command writes in each workspace"
    )]
    pub terraform_state_file: String,
}

#[derive(Args, Debug)]
pub struct MvArgs {
    #[arg(value_name = "ADDRESS", help = "module.<name> or <resource_type>.<name>")]
    pub address: String,
    #[arg(long, value_name = "FILE", help = "File holding the block")]
    pub from_file: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Directory whose .tf files are searched")]
    pub from_dir: Option<PathBuf>,
    #[arg(long, value_name = "FILE", help = "File the block is appended to")]
    pub to_file: Option<PathBuf>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory receiving module_<name>.tuf.tf or resources.tuf.tf"
    )]
    pub to_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {}
