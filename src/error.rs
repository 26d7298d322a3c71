//! # Error Types
//!
//! This module defines error types used throughout the zebrita library.

use thiserror::Error;

/// Main error type for zebrita operations
#[derive(Debug, Error)]
pub enum ZebritaError {
    /// Input blob could not be base64-decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Image processing or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Barcode symbol generation error
    #[error("Symbol error: {0}")]
    Symbol(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
