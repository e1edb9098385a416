//! ForeignSdk - the boundary to an attached platform SDK.
//!
//! Concrete bindings (FBInstant, ViberPlay, PokiSDK, ...) are external
//! collaborators; this port is the surface the shared hosted adapter
//! requires from them. Bindings normalize their SDK's ad callbacks into
//! [`AdOutcome`] themselves, but leave error codes in the platform's own
//! vocabulary - the adapter runs those through the per-platform
//! translation table.

use async_trait::async_trait;
use hostbridge_domain::AdPlacement;
use thiserror::Error;

use super::adapter::{AdOutcome, AdUnitIds, PauseCallback, PlayerSnapshot};

/// An error in the foreign SDK's own vocabulary, e.g. code
/// `"PENDING_REQUEST"` on Facebook or `"USER_INPUT"` on Viber.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct ForeignError {
    pub code: String,
    pub message: String,
}

impl ForeignError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Calls into the attached foreign SDK global.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForeignSdk: Send + Sync {
    /// The foreign SDK's own initialization call, if it has one.
    async fn init(&self) -> Result<(), ForeignError>;

    async fn fetch_ad_units(&self) -> Result<AdUnitIds, ForeignError>;

    async fn fetch_player(&self) -> Result<PlayerSnapshot, ForeignError>;

    async fn request_interstitial<'a>(
        &self,
        placement: AdPlacement,
        ad_unit_id: Option<&'a str>,
        description: &str,
    ) -> AdOutcome;

    async fn request_rewarded<'a>(&self, ad_unit_id: Option<&'a str>, description: &str)
        -> AdOutcome;

    async fn set_banner<'a>(&self, ad_unit_id: Option<&'a str>, visible: bool)
        -> Result<(), ForeignError>;

    async fn authenticate(&self) -> Result<bool, ForeignError>;

    async fn link_account(&self) -> Result<bool, ForeignError>;

    async fn entry_point_data(&self) -> Result<serde_json::Value, ForeignError>;

    async fn get_data(&self, keys: &[String]) -> Result<serde_json::Value, ForeignError>;

    async fn set_data(&self, data: serde_json::Value) -> Result<(), ForeignError>;

    fn register_pause(&self, callback: PauseCallback);

    fn set_loading_progress(&self, percent: u8);
}
