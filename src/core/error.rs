// Centralized error handling for the comment board

use crate::models::comment::CommentId;
use thiserror::Error;

/// Errors returned by the user and comment stores
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store is full: at most {max} records allowed")]
    CapacityExceeded { max: usize },

    #[error("Username '{0}' is already registered")]
    DuplicateUsername(String),

    #[error("User with username '{0}' not found")]
    UserNotFound(String),

    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: u32 },

    #[error("No records match '{0}'")]
    EmptyResult(String),
}

/// Errors raised by the session layer before a store operation runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Wrong password")]
    InvalidCredentials,

    #[error("Invalid username or password")]
    AdminLoginRejected,

    #[error("Comment {comment_id} belongs to another user")]
    PermissionDenied { comment_id: CommentId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors produced while reading console forms
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("End of input")]
    EndOfInput,

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Invalid choice, pick between 1 and {max}")]
    InvalidChoice { max: usize },

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid category '{0}', expected positive, neutral or negative")]
    InvalidCategory(String),
}

impl PromptError {
    /// Bad input the user can retry, as opposed to a closed or broken console
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PromptError::EndOfInput | PromptError::Io(_))
    }
}
