/// Error taxonomy for a sweep run
///
/// Every failure carries a severity. Fatal failures end the run; recoverable
/// ones abandon the current token and let the loop move on.

use std::fmt;

use sweeper_core::WireError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Abort the whole run with a non-zero exit
    Fatal,
    /// Log, skip the current token, continue
    Recoverable,
}

/// Failed HTTP exchange with the Ultra API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    /// HTTP status, absent for transport errors
    pub status: Option<u16>,
    /// JSON error body when the service sent one, status text otherwise
    pub detail: String,
}

impl ApiFailure {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: detail.into(),
        }
    }

    /// Response arrived with `status` but its body was unusable
    pub fn body(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid credential: {0}")]
    Credential(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Error fetching balances: {0}")]
    Balances(ApiFailure),

    #[error("Error creating order for {mint}: {failure}")]
    Order { mint: String, failure: ApiFailure },

    #[error("Error signing transaction for {mint}: {reason}")]
    Signing { mint: String, reason: String },

    #[error("Error executing order for {mint}: {failure}")]
    Execution { mint: String, failure: ApiFailure },
}

impl SweepError {
    pub fn severity(&self) -> Severity {
        match self {
            SweepError::Credential(_) | SweepError::Config(_) | SweepError::Balances(_) => {
                Severity::Fatal
            }
            SweepError::Order { .. } | SweepError::Signing { .. } | SweepError::Execution { .. } => {
                Severity::Recoverable
            }
        }
    }

    pub fn order(mint: &str, status: u16, err: WireError) -> Self {
        SweepError::Order {
            mint: mint.to_string(),
            failure: ApiFailure::body(status, err.to_string()),
        }
    }
}

/// Tagged outcome of one step of the per-token pipeline
#[derive(Debug)]
pub enum StepOutcome<T> {
    Completed(T),
    Recoverable(SweepError),
    Fatal(SweepError),
}

impl<T> From<Result<T, SweepError>> for StepOutcome<T> {
    fn from(result: Result<T, SweepError>) -> Self {
        match result {
            Ok(value) => StepOutcome::Completed(value),
            Err(err) => match err.severity() {
                Severity::Fatal => StepOutcome::Fatal(err),
                Severity::Recoverable => StepOutcome::Recoverable(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_failures_are_fatal() {
        assert_eq!(SweepError::Credential("empty".into()).severity(), Severity::Fatal);
        assert_eq!(
            SweepError::Balances(ApiFailure::transport("connection refused")).severity(),
            Severity::Fatal
        );
    }

    #[test]
    fn test_per_token_failures_are_recoverable() {
        let signing = SweepError::Signing {
            mint: "MintX".into(),
            reason: "bad base64".into(),
        };
        assert_eq!(signing.severity(), Severity::Recoverable);

        let outcome: StepOutcome<()> = Err(signing).into();
        assert!(matches!(outcome, StepOutcome::Recoverable(_)));
    }

    #[test]
    fn test_api_failure_display() {
        let failure = ApiFailure {
            status: Some(400),
            detail: r#"{"error":"bad mint"}"#.into(),
        };
        let err = SweepError::Order {
            mint: "MintX".into(),
            failure,
        };
        assert_eq!(
            err.to_string(),
            r#"Error creating order for MintX: HTTP 400: {"error":"bad mint"}"#
        );
    }
}
