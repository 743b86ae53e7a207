//! Error types for orbital evaluation and cloud sampling.

use thiserror::Error;

/// Everything that can go wrong before a cloud is produced.
///
/// Both variants are raised before the first sampling trial, so a failing call
/// never yields a partial cloud.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CloudError {
    #[error("invalid quantum state (n={n}, l={l}, m={m}, Z={z}): {reason}")]
    InvalidQuantumState {
        n: i64,
        l: i64,
        m: i64,
        z: i64,
        reason: &'static str,
    },

    #[error("invalid sampling parameter '{parameter}' = {value}: {reason}")]
    SamplingParameterError {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CloudError>;
