//! Unified application error type.
//! All modules (session, resolve, store, handlers) return AppError to keep
//! the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Exit code when any deferred error was recorded during the run.
pub const EXIT_PARTIAL_FAILURE: i32 = 1;
/// Exit code when login failed and the main loop was never entered.
pub const EXIT_NOT_LOGGED_IN: i32 = 100;
/// Exit code when the operator declines to continue after an interrupt.
pub const EXIT_ABORTED: i32 = 1;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Input resolution
    // ---------------------------
    #[error("Invalid input: {0}")]
    Validation(String),

    // ---------------------------
    // Handler-raised, recoverable at session level
    // ---------------------------
    #[error("{message}")]
    Domain {
        message: String,
        code: i32,
        subject: String,
        /// Raw page captured by the collaborator, persisted verbatim to a
        /// diagnostic dump file. Never interpreted by the core.
        payload: Option<String>,
    },

    // ---------------------------
    // Login failure, fatal before the loop
    // ---------------------------
    #[error("Cannot login: {0}")]
    Auth(String),

    // ---------------------------
    // Loop control: clean end of input, operator interrupt
    // ---------------------------
    #[error("end of input")]
    Eof,

    #[error("interrupted")]
    Interrupted,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn domain<S: Into<String>, T: Into<String>>(message: S, code: i32, subject: T) -> Self {
        AppError::Domain {
            message: message.into(),
            code,
            subject: subject.into(),
            payload: None,
        }
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AppError::Validation(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
