use crate::commands::{
    run_catalog, run_launch, run_optimal, run_simulate, CatalogArgs, LaunchArgs, OptimalArgs,
    SimulateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dauntless::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SCV Dauntless",
    about = "Run the SCV Dauntless mission prioritisation service or score selections from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the story catalog
    Catalog(CatalogArgs),
    /// Score a selection of stories and print the mission outcome
    Launch(LaunchArgs),
    /// Print the greedy reference selection for the current weights
    Optimal(OptimalArgs),
    /// Simulate a cohort of students picking stories at random
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog(args) => run_catalog(args),
        Command::Launch(args) => run_launch(args),
        Command::Optimal(args) => run_optimal(args),
        Command::Simulate(args) => run_simulate(args),
    }
}
