use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("No valid posts data provided")]
    NoValidData,

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire form of an analytics error: `{"error": "<message>"}`.
///
/// Callers that hand results straight to a JSON consumer branch on the
/// presence of the `error` key instead of a status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl From<&AnalyticsError> for ErrorPayload {
    fn from(err: &AnalyticsError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
