//! Centralized Error Handling Module
//!
//! Every failure the client surfaces flows through [`GuardError`]. Each error
//! carries a unique [`ErrorCode`] for logging, a human-readable message and,
//! for transport failures, the underlying `reqwest` error as its source.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - REMOTE_xxx: the service answered but the envelope signalled failure
//! - HTTP_xxx: transport-layer errors (connect, timeout, status, body)
//! - CFG_xxx: configuration errors

use std::fmt;

use crate::utils::constants::{
    MSG_AUDITS_NOT_DETECTED, MSG_INFORMATION_NOT_FOUND, MSG_NO_AUDITS_NOT_DETECTED,
};

/// Client-wide error type
#[derive(Debug)]
pub struct GuardError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message, printed verbatim by `Display`
    pub message: String,
    /// Envelope `code` when the service reported the failure
    pub remote_code: Option<i64>,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GuardError {
    /// Create a new GuardError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            remote_code: None,
            source: None,
        }
    }

    /// Create GuardError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            remote_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// The service answered and reported a failure (or had no usable payload)
    pub fn is_remote(&self) -> bool {
        self.code.is_remote()
    }

    /// Raised by the HTTP layer
    pub fn is_transport(&self) -> bool {
        self.code.is_transport()
    }

    /// Envelope `code` reported by the service, if any
    pub fn remote_code(&self) -> Option<i64> {
        self.remote_code
    }
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GuardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Remote API Errors
    // ============================================
    /// Envelope carried `msg` or no `result`
    RemoteApi,
    /// Token lookup returned an array instead of a keyed map
    NoAuditData,
    /// Token lookup map had no entry for the requested contract
    InformationNotFound,

    // ============================================
    // Transport Errors
    // ============================================
    /// Connection could not be established
    TransportConnect,
    /// Request timed out
    TransportTimeout,
    /// Non-2xx status without a parseable envelope
    TransportStatus,
    /// Response body was not valid JSON for the expected shape
    TransportDecode,
    /// Any other transport failure
    Transport,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Base URL could not be parsed or extended
    InvalidUrl,
    /// Invalid configuration value
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteApi => "REMOTE_API_ERROR",
            Self::NoAuditData => "REMOTE_NO_AUDIT_DATA",
            Self::InformationNotFound => "REMOTE_INFORMATION_NOT_FOUND",

            Self::TransportConnect => "HTTP_CONNECT_FAILED",
            Self::TransportTimeout => "HTTP_TIMEOUT",
            Self::TransportStatus => "HTTP_STATUS",
            Self::TransportDecode => "HTTP_DECODE",
            Self::Transport => "HTTP_ERROR",

            Self::InvalidUrl => "CFG_INVALID_URL",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RemoteApi | Self::NoAuditData | Self::InformationNotFound
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::TransportConnect
                | Self::TransportTimeout
                | Self::TransportStatus
                | Self::TransportDecode
                | Self::Transport
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl GuardError {
    /// Envelope failure: `"Error code: {code} | {text}"`
    pub fn remote(code: i64, text: &str) -> Self {
        Self {
            code: ErrorCode::RemoteApi,
            message: format!("Error code: {} | {}", code, text),
            remote_code: Some(code),
            source: None,
        }
    }

    /// Token lookup returned an array. The literal differs per lookup policy.
    pub fn no_audit_data(legacy_wording: bool) -> Self {
        let message = if legacy_wording {
            MSG_NO_AUDITS_NOT_DETECTED
        } else {
            MSG_AUDITS_NOT_DETECTED
        };
        Self::new(ErrorCode::NoAuditData, message)
    }

    /// Token lookup map had no usable entry
    pub fn information_not_found() -> Self {
        Self::new(ErrorCode::InformationNotFound, MSG_INFORMATION_NOT_FOUND)
    }

    /// Non-2xx status whose body was not an envelope
    pub fn http_status(status: reqwest::StatusCode) -> Self {
        Self::new(ErrorCode::TransportStatus, format!("HTTP status {}", status))
    }

    /// Invalid URL
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidUrl, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Client Result type
pub type GuardResult<T> = Result<T, GuardError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for GuardError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::TransportTimeout
        } else if err.is_connect() {
            ErrorCode::TransportConnect
        } else if err.is_status() {
            ErrorCode::TransportStatus
        } else if err.is_decode() {
            ErrorCode::TransportDecode
        } else {
            ErrorCode::Transport
        };
        let message = err.to_string();
        Self::with_source(code, message, err)
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        let message = format!("Failed to decode response: {}", err);
        Self::with_source(ErrorCode::TransportDecode, message, err)
    }
}

impl From<url::ParseError> for GuardError {
    fn from(err: url::ParseError) -> Self {
        let message = format!("Invalid URL: {}", err);
        Self::with_source(ErrorCode::InvalidUrl, message, err)
    }
}
