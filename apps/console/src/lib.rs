//! # Stockroom Console Library
//!
//! Interactive inventory and sales tracking over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! stockroom_console/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── config.rs       ◄─── AppConfig (stockroom.toml + STOCKROOM_*)
//! ├── console.rs      ◄─── Menu loop and dispatch
//! ├── commands/
//! │   ├── product.rs  ◄─── Add/list/update/delete products
//! │   └── sale.rs     ◄─── Register sale, sales summary
//! ├── prompt.rs       ◄─── Reply<T> and line prompts
//! ├── table.rs        ◄─── Fixed-width output tables
//! └── error.rs        ◄─── ConsoleError
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod prompt;
pub mod table;

use std::io;

use stockroom_db::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{AppConfig, ConfigError};
pub use console::{Console, MenuChoice};
pub use error::{ConsoleError, ConsoleResult};
pub use prompt::Reply;

/// Filter used when neither `STOCKROOM_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,stockroom=info,sqlx=warn";

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • STOCKROOM_DB_PATH, pool settings, currency symbol                 │
/// │                                                                         │
/// │  2. Connect to Database ──────────────────────────────────────────────► │
/// │     • Create the data directory if needed                               │
/// │     • SQLite with WAL mode, foreign keys on                             │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  3. Run Menu ─────────────────────────────────────────────────────────► │
/// │     • stdin / stdout until Exit or end of input                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Any error returned from here is a startup failure or a broken terminal;
/// errors inside menu actions are reported and the menu continues.
pub async fn run() -> ConsoleResult<()> {
    info!("Starting Stockroom");

    let config = AppConfig::from_env()?;
    config.ensure_db_dir()?;
    info!(db_path = %config.db_path.display(), "Database path determined");

    let db = Database::new(config.to_db_config()).await?;
    info!("Database connected and migrations applied");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), db.clone(), config);
    let result = console.run().await;

    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `STOCKROOM_LOG=debug` - Show debug messages (checked first)
/// - `RUST_LOG=stockroom_db=trace` - Standard override
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so they never land in the middle of the menu.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("STOCKROOM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
