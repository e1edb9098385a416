//! Unified error taxonomy for the SDK surface.
//!
//! Every public capability method fails with an [`SdkError`] carrying a
//! closed [`ErrorCode`], a message, the API name that raised it, and an
//! optional docs link. Validation failures are produced locally and never
//! reach a foreign SDK; foreign SDK errors are re-mapped into the same
//! shape at the adapter boundary so games see one error contract
//! regardless of platform.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Closed set of error codes surfaced to games.
///
/// The first group is raised by the SDK itself; the second group is
/// re-mapped from foreign SDK errors through a per-platform translation
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A parameter failed validation before any dispatch.
    InvalidParam,
    /// The operation is not available on the current platform.
    NotSupported,
    /// The operation is not valid in the current SDK state.
    InvalidOperation,
    /// The operation was dispatched but failed.
    OperationFailed,
    /// Bootstrap could not complete.
    InitializationError,
    /// A bounded wait for readiness expired.
    TimedOut,

    // Re-mapped from foreign SDKs.
    /// An authentication flow is already in progress.
    AuthInProgress,
    /// The user cancelled or dismissed a required prompt.
    UserInput,
    /// The platform throttled the call.
    RateLimited,
    /// The platform reported a connectivity failure.
    NetworkFailure,
}

impl ErrorCode {
    /// The SCREAMING_SNAKE_CASE wire name, as games log it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParam => "INVALID_PARAM",
            ErrorCode::NotSupported => "NOT_SUPPORTED",
            ErrorCode::InvalidOperation => "INVALID_OPERATION",
            ErrorCode::OperationFailed => "OPERATION_FAILED",
            ErrorCode::InitializationError => "INITIALIZATION_ERROR",
            ErrorCode::TimedOut => "TIMED_OUT",
            ErrorCode::AuthInProgress => "AUTH_IN_PROGRESS",
            ErrorCode::UserInput => "USER_INPUT",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::NetworkFailure => "NETWORK_FAILURE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error surfaced by every capability method.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {message} ({context})")]
pub struct SdkError {
    /// Closed error code.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// The API name that raised the error, e.g. `ads.showInterstitial`.
    pub context: String,
    /// Link to the docs page for the failing API, when one exists.
    pub url: Option<String>,
}

impl SdkError {
    /// Create an error with no docs link.
    pub fn new(code: ErrorCode, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: context.into(),
            url: None,
        }
    }

    /// Attach the docs page for the given API name.
    pub fn with_docs(mut self, api: &str) -> Self {
        self.url = Some(docs_url(api));
        self
    }

    /// A validation failure for the given API.
    pub fn invalid_param(message: impl Into<String>, api: &str) -> Self {
        Self::new(ErrorCode::InvalidParam, message, api).with_docs(api)
    }

    /// The operation is not available on the current platform.
    pub fn not_supported(api: &str) -> Self {
        Self::new(
            ErrorCode::NotSupported,
            format!("{api} is not supported on this platform"),
            api,
        )
        .with_docs(api)
    }

    /// The operation is not valid in the current SDK state.
    pub fn invalid_operation(message: impl Into<String>, api: &str) -> Self {
        Self::new(ErrorCode::InvalidOperation, message, api).with_docs(api)
    }

    /// A dispatched operation failed.
    pub fn operation_failed(message: impl Into<String>, api: &str) -> Self {
        Self::new(ErrorCode::OperationFailed, message, api).with_docs(api)
    }

    /// Bootstrap could not complete.
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InitializationError, message, "initializeAsync")
    }

    /// A bounded readiness wait expired.
    pub fn timed_out(api: &str) -> Self {
        Self::new(
            ErrorCode::TimedOut,
            format!("{api} timed out waiting for platform readiness"),
            api,
        )
    }
}

/// The docs page for an API name, e.g. `ads.showInterstitial` ->
/// `https://docs.hostbridge.dev/api/ads#showinterstitial`.
pub fn docs_url(api: &str) -> String {
    match api.split_once('.') {
        Some((family, method)) => format!(
            "https://docs.hostbridge.dev/api/{family}#{}",
            method.to_lowercase()
        ),
        None => format!("https://docs.hostbridge.dev/api/{}", api.to_lowercase()),
    }
}
