//! Error types for reel construction

use thiserror::Error;

/// Reel error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReelError {
    #[error("Invalid reel config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ReelError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ReelError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type ReelResult<T> = Result<T, ReelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReelError::invalid("slowdown_rate", "must be in (0, 1), got 1.2");
        let msg = err.to_string();
        assert!(msg.contains("slowdown_rate"));
        assert!(msg.contains("1.2"));
    }
}
