use anyhow::Result;
use brlfx::core::log::{default_level, init_logging};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for brlfx::AppCommand {
    fn from(cmd: Commands) -> brlfx::AppCommand {
        match cmd {
            Commands::Serve => brlfx::AppCommand::Serve,
            Commands::Show => brlfx::AppCommand::Show,
            Commands::Series { tax } => brlfx::AppCommand::Series { tax },
            Commands::Means => brlfx::AppCommand::Means,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the rate curve as JSON on GET / (default)
    Serve,
    /// Fetch the rate curve once and print it
    Show,
    /// Print one currency's full series
    Series {
        /// Tax code: PTX (USD/BRL) or EUR (EUR/BRL)
        #[arg(short, long, default_value = "PTX")]
        tax: String,
    },
    /// Print monthly average rates
    Means,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    init_logging(default_level(cli.verbose, matches!(command, Commands::Serve)));

    let result = match command {
        Commands::Setup => brlfx::cli::setup::setup(),
        cmd => brlfx::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
