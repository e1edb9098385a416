//! Validation results.
//!
//! Validators return a result instead of raising: the calling wrapper
//! method is the single point that converts a failure into an [`SdkError`]
//! tagged with the API name and its docs link. That keeps error-context
//! tagging in one place per capability.

use hostbridge_domain::{ErrorCode, SdkError};

/// A failed precondition, not yet tagged with the API that was called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// An `INVALID_PARAM` failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParam, message)
    }

    /// Tag with the raising API and its docs link.
    pub fn into_error(self, api: &str) -> SdkError {
        SdkError::new(self.code, self.message, api).with_docs(api)
    }
}

/// Outcome of a validator: `Ok(())` or the failure to tag.
pub type Validation = Result<(), ValidationError>;
