use crate::demo::{run_demo, run_triage_assign, DemoArgs, TriageAssignArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rehab_ai::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Rehab Care Orchestrator",
    about = "Run and demonstrate the rehab triage and approvals service from the command line",
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
    /// Triage utilities for operator spot checks
    Triage {
        #[command(subcommand)]
        command: TriageCommand,
    },
    /// Run an end-to-end CLI demo covering triage and approval workflows
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum TriageCommand {
    /// Classify one injury description and assign the least-loaded caregiver
    Assign(TriageAssignArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON export of the caregiver roster (defaults to the built-in demo roster)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Triage {
            command: TriageCommand::Assign(args),
        } => run_triage_assign(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
