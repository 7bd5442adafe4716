//! # Stockroom Entry Point
//!
//! Exit codes:
//! - `0` - user chose Exit, or stdin closed
//! - `1` - configuration, database startup, or terminal failure

use std::process::ExitCode;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    stockroom_console::init_tracing();

    match stockroom_console::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Stockroom stopped");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
