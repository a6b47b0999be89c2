//! Crate error type

use thiserror::Error;

/// Errors raised before any maze or game is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Grid must have at least one row and one column
    #[error("invalid maze dimensions {rows}x{columns}: rows and columns must be at least 1")]
    InvalidDimensions { rows: usize, columns: usize },
    /// Arena must have a finite, positive size
    #[error("invalid arena size {width}x{height}: width and height must be positive")]
    InvalidArena { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, Error>;
