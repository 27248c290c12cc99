mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, create::CreateArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "actiontypes",
    about = "Browse Action Type records and create new ones through a validated, confirm-before-commit flow",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .actiontypes/)
    #[arg(long, global = true, env = "ACTIONTYPES_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List action types (the selected one is marked with *)
    List,

    /// Show the full record of one action type
    Show { id: String },

    /// Build an action type from form fields, review it, and commit with --yes
    #[command(disable_version_flag = true)]
    Create(CreateArgs),

    /// Pretty-print a JSON document (file, or stdin when omitted)
    Format { file: Option<PathBuf> },

    /// Inspect, validate or initialize the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Create(args) if args.yes => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::List => cmd::list::run(&root, cli.json),
        Commands::Show { id } => cmd::show::run(&root, &id, cli.json),
        Commands::Create(args) => cmd::create::run(&root, args, cli.json),
        Commands::Format { file } => cmd::format::run(file.as_deref()),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
