//! Esfiharia CLI

use std::process::ExitCode;

use esfiharia::observability::init_subscriber;

mod cli;

#[tokio::main]
#[expect(
    clippy::print_stderr,
    reason = "command failures are reported on stderr."
)]
async fn main() -> ExitCode {
    let cli = cli::Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = init_subscriber(cli.logging()) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
