//! # Error Types
//!
//! This module defines error types used throughout the labelsheet library.

use thiserror::Error;

/// Main error type for labelsheet operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Requested template name (or product code) is not registered
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    /// Template dimensions violate the registry invariants
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Grid scale must be positive and finite
    #[error("Invalid scale: {0}")]
    InvalidScale(f32),

    /// A scene instruction lies outside any sane page bound
    #[error("Malformed scene: {0}")]
    MalformedScene(String),

    /// No free slot left on the sheet
    #[error("Sheet is full")]
    SheetFull,

    /// Slot index does not exist on the current page
    #[error("Invalid slot: {0}")]
    InvalidSlot(usize),

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Address list, entry file or background image could not be used
    #[error("Invalid input: {0}")]
    Input(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LabelError>;
