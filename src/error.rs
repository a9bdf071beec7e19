// SPDX-License-Identifier: GPL-3.0-only
//! Error types for the backend
//!
//! One enum covers both failure classes: external ddcutil invocations that
//! exit non-zero and ddcutil output that does not have the expected shape.

use thiserror::Error;

/// Main backend error type
#[derive(Error, Debug)]
pub enum BackendError {
    /// The external command could not be spawned at all
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external command ran but exited non-zero
    #[error("`{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    /// A mandatory key was absent from the parsed ddcutil output
    #[error("key `{key}` missing from ddcutil output")]
    MissingField { key: String },

    /// A field that should carry an integer did not
    #[error("no integer in `{field}` value {text:?}")]
    InvalidNumber { field: &'static str, text: String },

    /// A getvcp brief reply too short to contain a brightness token
    #[error("malformed getvcp reply: {reply:?}")]
    MalformedReply { reply: String },
}

/// Result type alias for BackendError
pub type Result<T> = std::result::Result<T, BackendError>;
