use std::process::ExitCode;

use clap::Parser;
use hd_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match hd_cli::run_app(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Tracing may not be up yet if startup itself failed.
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
