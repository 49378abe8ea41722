use clap::{Parser, Subcommand};
use plugctl::{
    commands::{config, info, paths},
    GlobalOpts,
};
use plugctl_logger as logger;

#[derive(Parser)]
#[command(name = "plugctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Plugin manifest inspector",
    long_about = "plugctl looks up plugin manifests in install receipts and the plugin index."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a plugin (installed or available in the index)
    Info(info::InfoCommand),
    /// Show the directories plugctl reads from
    Paths,
    /// Manage the plugctl configuration file
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let result = match cli.command {
        Commands::Info(cmd) => info::handle_info(&cmd, &cli.global),
        Commands::Paths => paths::handle_paths(&cli.global),
        Commands::Config { action } => config::handle_config(&action, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&e.to_string());
        if let Some(log_path) = logger::get_log_path() {
            logger::debug(&format!("Log file: {}", log_path.display()));
        }
        std::process::exit(e.exit_code());
    }
}
