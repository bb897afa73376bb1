use thiserror::Error;

/// Result type alias for prefix resolution operations
pub type Result<T> = std::result::Result<T, PrefixError>;

/// Errors that can occur while resolving the prefixes of an ASN
#[derive(Error, Debug)]
pub enum PrefixError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Upstream answered with a non-success HTTP status
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Body or reason returned by the upstream
        message: String,
    },

    /// Upstream answered 2xx but its payload `status` was not the success sentinel
    #[error("{source_name} API error: status {status:?}{}", detail(.message))]
    UpstreamStatus {
        /// Name of the source that reported the status
        source_name: String,
        /// Status value found in the payload
        status: String,
        /// Explanation the upstream attached to the status, if any
        message: Option<String>,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ASN could not be reduced to its numeric form
    #[error("invalid ASN format: {0}")]
    InvalidAsn(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Bulk table cache could not be read or written
    #[error("cache error: {0}")]
    Cache(String),

    /// Local filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl PrefixError {
    /// Returns true if the error happened on the wire rather than in the payload
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::Connection(_) | Self::Api { .. }
        )
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(PrefixError::Timeout(10).is_transport());
        assert!(PrefixError::Connection("refused".into()).is_transport());
        assert!(PrefixError::Api {
            code: 503,
            message: String::new()
        }
        .is_transport());
        assert!(!PrefixError::InvalidAsn("ASX".into()).is_transport());
        assert!(!PrefixError::UpstreamStatus {
            source_name: "RIPEstat".into(),
            status: "error".into(),
            message: None,
        }
        .is_transport());
    }

    #[test]
    fn test_status_code() {
        let err = PrefixError::Api {
            code: 404,
            message: "not found".into(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(PrefixError::Timeout(30).status_code(), None);
    }

    #[test]
    fn test_display() {
        let err = PrefixError::UpstreamStatus {
            source_name: "BGPView".into(),
            status: "error".into(),
            message: None,
        };
        assert_eq!(err.to_string(), "BGPView API error: status \"error\"");
        let err = PrefixError::UpstreamStatus {
            source_name: "BGPView".into(),
            status: "error".into(),
            message: Some("Malformed input".into()),
        };
        assert_eq!(
            err.to_string(),
            "BGPView API error: status \"error\": Malformed input"
        );
        assert_eq!(
            PrefixError::InvalidAsn("ASfoo".into()).to_string(),
            "invalid ASN format: ASfoo"
        );
    }
}
