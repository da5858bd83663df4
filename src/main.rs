// Fintrack - Personal Finance Backend Client
use clap::Parser;
use fintrack::cli::args::Args;
use fintrack::cli::commands::execute_command;
use fintrack::domain::error::FintrackError;

#[tokio::main]
async fn main() -> Result<(), FintrackError> {
    let args = Args::parse();

    match execute_command(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
