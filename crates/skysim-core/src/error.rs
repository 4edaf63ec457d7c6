//! Error types shared by the skysim simulation libraries.
//!
//! A wrong or missing simulation must never be masked as a valid one, so
//! errors from leaf collaborators (storage, transform engine, noise source)
//! propagate to the caller unmodified. No variant here represents a partial
//! result.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::CmbField;

/// Errors raised by simulation libraries and their collaborators.
#[derive(Debug, Error)]
pub enum SimError {
    /// The backing storage for a requested index or field does not exist.
    #[error("missing simulation data at {path}: {reason}")]
    DataNotFound {
        /// Location that was looked up.
        path: PathBuf,
        /// What was missing (file, container slot, ...).
        reason: String,
    },

    /// A field was requested from a source variant that does not provide it.
    #[error("field {field} is not provided by the {source} source")]
    FieldNotSupported {
        /// The requested field.
        field: CmbField,
        /// Short tag naming the refusing source.
        source: &'static str,
    },

    /// Incompatible parameters supplied at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A noise realization's length disagrees with the pixel count implied
    /// by the configured resolution.
    #[error("noise realization has {actual} pixels, expected {expected}")]
    ResolutionMismatch {
        /// Pixel count implied by the configured resolution.
        expected: usize,
        /// Pixel count actually delivered.
        actual: usize,
    },

    /// A raw integer index that is neither the observed-data sentinel nor a
    /// valid synthetic index crossed the boundary.
    #[error("invalid raw simulation index {0}")]
    InvalidIndex(i64),
}

impl SimError {
    /// Convenience constructor for [`SimError::DataNotFound`].
    pub fn not_found(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SimError::DataNotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`SimError::Configuration`].
    pub fn config(reason: impl Into<String>) -> Self {
        SimError::Configuration(reason.into())
    }
}
