//! Error types for krishi-tui
//!
//! Wraps library errors and terminal/IO errors for unified handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    /// Library error; an inactive session lands here and is fatal
    #[error("Service error: {0}")]
    Service(#[from] libkrishi::KrishiError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Application state error
    #[error("Application error: {0}")]
    Application(String),
}

impl TuiError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TuiError::Service(e) => e.exit_code(),
            TuiError::Terminal(_) => 1,
            TuiError::Application(_) => 1,
        }
    }
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
