//! Central error handling for the mirror3d crate.
//!
//! Provides a unified MirrorError enum with consistent categorization.
//! The per-frame reflection pipeline itself is infallible by design; errors
//! only arise at the GPU seam (device acquisition, target validation).

/// Centralized error type for all mirror operations
#[derive(thiserror::Error, Debug)]
pub enum MirrorError {
    #[error("Device error: {0}")]
    Device(String),

    #[error("Allocation error: {0}")]
    Allocation(String),
}

impl MirrorError {
    /// Convenience constructors for common error types
    pub fn device<T: ToString>(msg: T) -> Self {
        MirrorError::Device(msg.to_string())
    }

    pub fn allocation<T: ToString>(msg: T) -> Self {
        MirrorError::Allocation(msg.to_string())
    }
}

/// Result type alias for mirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;
