//! Error types for the slot machine

use thiserror::Error;

use rf_reel::ReelError;

/// Slot machine error type
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid machine config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Reel error: {0}")]
    Reel(#[from] ReelError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SlotError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SlotError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SlotError {
    fn from(err: serde_json::Error) -> Self {
        SlotError::Serialization(err.to_string())
    }
}

impl From<serde_yml::Error> for SlotError {
    fn from(err: serde_yml::Error) -> Self {
        SlotError::Serialization(err.to_string())
    }
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SlotError::invalid("reel_count", "must be at least 1");
        assert!(err.to_string().contains("reel_count"));
    }

    #[test]
    fn test_reel_error_wraps() {
        let err: SlotError = ReelError::InvalidConfig {
            field: "snap_range",
            reason: "must be >= 0".into(),
        }
        .into();
        assert!(matches!(err, SlotError::Reel(_)));
        assert!(err.to_string().contains("snap_range"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: SlotError = parse.unwrap_err().into();
        assert!(matches!(err, SlotError::Serialization(_)));
    }
}
