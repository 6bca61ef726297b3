use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "config.voice_id", "voice_settings.stability")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "synthesis", "playback")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the speech synthesis client.
/// This aggregates all low-level errors into actionable, high-level categories
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {message}{}", format_context(.context))]
    Network {
        message: String,
        context: ErrorContext,
    },

    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Audio error: {message}{}", format_context(.context))]
    Audio {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new network error with structured context
    pub fn network_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Network {
            message: msg.into(),
            context,
        }
    }

    /// Create a new API error from a non-success HTTP status
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a new audio error with structured context
    pub fn audio_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Audio {
            message: msg.into(),
            context,
        }
    }

    /// Whether this error is a quota / credential-exhaustion rejection from the
    /// remote API (the provider returns 401 once the key is invalidated and
    /// 429 once the character quota is spent).
    pub fn is_quota(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status == 401 || *status == 402 || *status == 429)
    }

    /// Whether retrying the same request could plausibly succeed.
    /// The client itself never retries; this is classification for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network { .. } => true,
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_display() {
        let err = Error::configuration_with_context(
            "missing voice id",
            ErrorContext::new()
                .with_field_path("config.voice_id")
                .with_source("config"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing voice id"));
        assert!(msg.contains("field: config.voice_id"));
        assert!(msg.contains("source: config"));
    }

    #[test]
    fn test_quota_classification() {
        assert!(Error::api(429, "quota exceeded").is_quota());
        assert!(Error::api(401, "invalid key").is_quota());
        assert!(!Error::api(500, "server error").is_quota());
        assert!(!Error::network("connection refused").is_quota());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(Error::network("timed out").is_retryable());
        assert!(Error::api(503, "overloaded").is_retryable());
        assert!(Error::api(429, "slow down").is_retryable());
        assert!(!Error::api(400, "bad request").is_retryable());
        assert!(!Error::configuration("no key").is_retryable());
    }
}
