use std::process::ExitCode;

use reviewgate::cli;
use reviewgate::ui::output;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // {:#} renders the full context chain on one line.
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
