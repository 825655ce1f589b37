//! Panic payloads turned into ordinary errors.
//!
//! A scenario or mock that panics is treated exactly like one that returned
//! an error: the panic is caught and surfaced as a [`PanicError`].

use std::any::Any;
use thiserror::Error;

/// A caught panic, carrying the panic message when one was available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panicked: {message}")]
pub struct PanicError {
    /// The `&str` or `String` the code panicked with.
    pub message: String,
}

impl PanicError {
    /// Build from the payload returned by `catch_unwind`.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}
