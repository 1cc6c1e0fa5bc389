//! newstrack - tracking IDs and publish status for news articles

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = newstrack::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
