//! Foreign error translation.
//!
//! Each foreign SDK reports failures in its own vocabulary. This table
//! re-maps those codes onto the shared [`ErrorCode`] set at the adapter
//! boundary, so games see one error shape regardless of platform.

use hostbridge_domain::{ErrorCode, Platform, SdkError};

use crate::ports::outbound::ForeignError;

/// Map a foreign error into the shared taxonomy, tagged with the API that
/// was being called. Unknown codes degrade to `OPERATION_FAILED`.
pub fn translate_foreign_error(platform: Platform, api: &str, err: ForeignError) -> SdkError {
    let code = match platform {
        Platform::Facebook => facebook_code(&err.code),
        Platform::Viber | Platform::Link => rakuten_code(&err.code),
        Platform::Yandex => yandex_code(&err.code),
        _ => common_code(&err.code),
    };

    SdkError::new(code, format!("{} ({})", err.message, err.code), api).with_docs(api)
}

fn facebook_code(code: &str) -> ErrorCode {
    match code {
        "INVALID_PARAM" => ErrorCode::InvalidParam,
        "CLIENT_UNSUPPORTED_OPERATION" | "UNSUPPORTED_OPERATION" => ErrorCode::NotSupported,
        "INVALID_OPERATION" => ErrorCode::InvalidOperation,
        "PENDING_REQUEST" => ErrorCode::AuthInProgress,
        "USER_INPUT" => ErrorCode::UserInput,
        "RATE_LIMITED" => ErrorCode::RateLimited,
        "NETWORK_FAILURE" => ErrorCode::NetworkFailure,
        _ => ErrorCode::OperationFailed,
    }
}

/// Viber and Link share the same SDK family and error vocabulary.
fn rakuten_code(code: &str) -> ErrorCode {
    match code {
        "INVALID_PARAM" => ErrorCode::InvalidParam,
        "UNSUPPORTED_OPERATION" => ErrorCode::NotSupported,
        "AUTH_IN_PROGRESS" | "PENDING_REQUEST" => ErrorCode::AuthInProgress,
        "USER_INPUT" => ErrorCode::UserInput,
        "RATE_LIMITED" => ErrorCode::RateLimited,
        "NETWORK_FAILURE" => ErrorCode::NetworkFailure,
        _ => ErrorCode::OperationFailed,
    }
}

fn yandex_code(code: &str) -> ErrorCode {
    match code {
        "USER_NOT_AUTHORIZED" => ErrorCode::UserInput,
        "UNSUPPORTED" => ErrorCode::NotSupported,
        "NETWORK_ERROR" => ErrorCode::NetworkFailure,
        _ => ErrorCode::OperationFailed,
    }
}

fn common_code(code: &str) -> ErrorCode {
    match code {
        "INVALID_PARAM" => ErrorCode::InvalidParam,
        "NOT_SUPPORTED" | "UNSUPPORTED_OPERATION" => ErrorCode::NotSupported,
        "INVALID_OPERATION" => ErrorCode::InvalidOperation,
        "USER_INPUT" => ErrorCode::UserInput,
        "RATE_LIMITED" => ErrorCode::RateLimited,
        "NETWORK_FAILURE" | "NETWORK_ERROR" => ErrorCode::NetworkFailure,
        _ => ErrorCode::OperationFailed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facebook_pending_request_maps_to_auth_in_progress() {
        let err = translate_foreign_error(
            Platform::Facebook,
            "core.authenticateAsync",
            ForeignError::new("PENDING_REQUEST", "auth dialog already open"),
        );
        assert_eq!(err.code, ErrorCode::AuthInProgress);
        assert_eq!(err.context, "core.authenticateAsync");
    }

    #[test]
    fn test_unknown_codes_degrade_to_operation_failed() {
        let err = translate_foreign_error(
            Platform::Poki,
            "ads.showInterstitial",
            ForeignError::new("KABOOM", "?"),
        );
        assert_eq!(err.code, ErrorCode::OperationFailed);
        assert!(err.message.contains("KABOOM"));
    }

    #[test]
    fn test_viber_and_link_share_a_table() {
        for platform in [Platform::Viber, Platform::Link] {
            let err = translate_foreign_error(
                platform,
                "player.getDataAsync",
                ForeignError::new("USER_INPUT", "declined"),
            );
            assert_eq!(err.code, ErrorCode::UserInput);
        }
    }
}
