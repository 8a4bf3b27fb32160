//! Error types for the E2E harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid test data: {0}")]
    Validation(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element not actionable: {0}")]
    ElementNotActionable(String),

    #[error("Timeout after {ms}ms waiting for: {what}")]
    Timeout { what: String, ms: u64 },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Fixture setup failed: {0}")]
    Fixture(String),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

impl HarnessError {
    /// True for errors that should fail the whole run before any test
    /// executes, as opposed to failing a single test.
    pub fn is_precondition(&self) -> bool {
        matches!(self, HarnessError::Precondition(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_the_wait_target() {
        let err = HarnessError::Timeout {
            what: "url fragment '/dashboard'".to_string(),
            ms: 30000,
        };
        let msg = err.to_string();
        assert!(msg.contains("30000ms"));
        assert!(msg.contains("/dashboard"));
    }

    #[test]
    fn precondition_is_distinguished_from_test_failures() {
        assert!(HarnessError::Precondition("app down".into()).is_precondition());
        assert!(!HarnessError::Assertion("nope".into()).is_precondition());
    }
}
