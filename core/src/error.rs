use thiserror::Error;

pub type QueueResult<T> = Result<T, QueueError>;

/// Failures surfaced by the calculator and the simulator.
///
/// An unstable system (μ ≤ λ) is not an error: it is reported through the
/// `stable` verdict of [`crate::AnalyticResult`].
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("histogram setup failed: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),

    #[error("config serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueueError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
