//! # Console Error Type
//!
//! Unified error type for menu actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Menu action (add, update, register sale, ...)                         │
//! │  Result<(), ConsoleError>                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  DbError ───────────► ConsoleError::Db ────┐                            │
//! │  CoreError ─────────► ConsoleError::Core ──┤                            │
//! │                                            ▼                            │
//! │                          dispatch boundary: print user_message(),      │
//! │                          log with tracing::error!, show menu again     │
//! │                                                                         │
//! │  io::Error ─────────► ConsoleError::Io ────► loop ends with error      │
//! │  stdin closed ──────► ConsoleError::EndOfInput ──► loop ends cleanly   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::CoreError;
use stockroom_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while running the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Storage failure; the menu keeps running.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Business rule rejected the action; the menu keeps running.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Startup configuration was unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading stdin or writing stdout failed.
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stdin was closed while waiting for a reply.
    #[error("End of input")]
    EndOfInput,
}

impl ConsoleError {
    /// True when the menu loop can't continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConsoleError::Io(_) | ConsoleError::EndOfInput)
    }

    /// The line shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Db(err) if err.is_connection() => {
                format!("Database connection failed: {}", err)
            }
            ConsoleError::Db(err) => format!("Database error: {}", err),
            ConsoleError::Core(CoreError::InsufficientStock { available, .. }) => {
                format!("Error: Not enough stock. Only {} available.", available)
            }
            ConsoleError::Core(CoreError::Validation(err)) => format!("Error: {}.", err),
            ConsoleError::Config(err) => err.to_string(),
            other => format!("An unexpected error occurred: {}", other),
        }
    }
}

/// Convenience type alias for Results with ConsoleError.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ValidationError;

    #[test]
    fn test_insufficient_stock_message() {
        let err = ConsoleError::from(CoreError::InsufficientStock {
            product: "Widget".to_string(),
            available: 10,
            requested: 11,
        });

        assert_eq!(err.user_message(), "Error: Not enough stock. Only 10 available.");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_validation_message() {
        let err = ConsoleError::from(CoreError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }));

        assert_eq!(err.user_message(), "Error: quantity must be positive.");
    }

    #[test]
    fn test_db_messages_distinguish_connection_failures() {
        let conn = ConsoleError::from(DbError::ConnectionFailed("pool closed".to_string()));
        assert!(conn.user_message().starts_with("Database connection failed:"));

        let fk = ConsoleError::from(DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        });
        assert_eq!(
            fk.user_message(),
            "Database error: Foreign key violation: FOREIGN KEY constraint failed"
        );
        assert!(!fk.is_fatal());
    }

    #[test]
    fn test_fatal_errors() {
        assert!(ConsoleError::EndOfInput.is_fatal());

        let io = ConsoleError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert!(io.is_fatal());
        assert!(io.user_message().starts_with("An unexpected error occurred:"));
    }
}
