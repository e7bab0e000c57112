//! Error types for dalysim.
//!
//! All errors are strongly typed using thiserror. The engine itself has no
//! error path; these types cover the calibration source and the request
//! boundary that sit on either side of it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a calibration source.
///
/// `CalibrationStore::load` absorbs these and substitutes defaults; only
/// `CalibrationStore::try_load` surfaces them.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Calibration source {path} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Calibration source {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Validation errors for calibration values.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Efficacy '{lever}' = {value} is out of range [0.0, 1.0]")]
    EfficacyOutOfRange {
        lever: &'static str,
        value: f64,
    },

    #[error("Share '{field}' = {value} is out of range [0.0, 1.0]")]
    ShareOutOfRange {
        field: String,
        value: f64,
    },

    #[error("Field '{field}' is not a finite number")]
    NonFiniteValue {
        field: String,
    },

    #[error("Baseline DALYs must be non-negative (got {value})")]
    NegativeBaseline {
        value: f64,
    },
}

/// Malformed simulation requests, rejected before they reach the engine.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Request toggles are malformed: {0}")]
    InvalidToggle(#[source] serde_json::Error),

    #[error("Request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error type for dalysim.
#[derive(Debug, Error)]
pub enum DalyError {
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed request: {0}")]
    Request(#[from] RequestError),
}

impl DalyError {
    /// Returns true if this is a calibration source error.
    #[must_use]
    pub const fn is_calibration(&self) -> bool {
        matches!(self, Self::Calibration(_))
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a malformed request.
    #[must_use]
    pub const fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}

/// Result type alias for dalysim operations.
pub type DalyResult<T> = Result<T, DalyError>;
