//! Error types for timetable extraction
//!
//! Every failure a lookup can produce is one of four kinds. The `Display`
//! text of each variant is exactly the message shown to the caller.
//! TimetableError implements Serialize so it can be rendered as a plain string.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::QueryKind;

/// Error type for timetable lookups
#[derive(Error, Debug)]
pub enum TimetableError {
    /// The request was rejected before any page was loaded
    #[error("{0}")]
    InvalidQuery(String),

    /// The timetable page could not be loaded
    #[error("{0}")]
    SourceUnavailable(String),

    /// The page loaded but no row satisfied the query
    #[error("no subject with entered {} found", .0.plural())]
    NoMatches(QueryKind),

    /// Anything else: browser launch failure, crashed CDP connection, ...
    #[error("{0}")]
    Internal(String),
}

impl TimetableError {
    /// Whether the error is the caller's to fix (400-class) rather than ours (500-class).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidQuery(_) | Self::NoMatches(_))
    }
}

impl From<reqwest::Error> for TimetableError {
    fn from(err: reqwest::Error) -> Self {
        Self::SourceUnavailable(err.to_string())
    }
}

/// Serialize TimetableError as its message string
impl Serialize for TimetableError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for timetable operations
pub type Result<T> = std::result::Result<T, TimetableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_display_is_bare_message() {
        let error = TimetableError::InvalidQuery("type is required".to_string());
        assert_eq!(error.to_string(), "type is required");
    }

    #[test]
    fn test_no_matches_display_code() {
        let error = TimetableError::NoMatches(QueryKind::Code);
        assert_eq!(error.to_string(), "no subject with entered codes found");
    }

    #[test]
    fn test_no_matches_display_name() {
        let error = TimetableError::NoMatches(QueryKind::Name);
        assert_eq!(error.to_string(), "no subject with entered names found");
    }

    #[test]
    fn test_source_unavailable_keeps_underlying_message() {
        let error = TimetableError::SourceUnavailable("net::ERR_NAME_NOT_RESOLVED".to_string());
        assert_eq!(error.to_string(), "net::ERR_NAME_NOT_RESOLVED");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(TimetableError::InvalidQuery("no codes".to_string()).is_client_error());
        assert!(TimetableError::NoMatches(QueryKind::Name).is_client_error());
        assert!(!TimetableError::SourceUnavailable("timeout".to_string()).is_client_error());
        assert!(!TimetableError::Internal("browser crashed".to_string()).is_client_error());
    }

    #[test]
    fn test_error_serialize() {
        let error = TimetableError::NoMatches(QueryKind::Code);
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"no subject with entered codes found\"");
    }

    #[test]
    fn test_error_serialize_internal() {
        let error = TimetableError::Internal("boom".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"boom\"");
    }
}
