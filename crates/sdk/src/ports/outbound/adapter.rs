//! PlatformAdapter - the contract every platform integration satisfies.
//!
//! One adapter is selected per resolved [`Platform`] at startup and every
//! capability call dispatches through it. Adapters own exactly one foreign
//! SDK each and are responsible for translating that SDK's callback/promise
//! conventions into the uniform contracts below; nothing platform-specific
//! leaks past this boundary.

use async_trait::async_trait;
use hostbridge_domain::{AdPlacement, ErrorCode, Platform, SdkError};

/// Callback registered by the game, invoked when the platform pauses it.
pub type PauseCallback = Box<dyn FnMut() + Send + 'static>;

/// Terminal result of one foreign ad request, normalized across the
/// heterogeneous foreign vocabularies (`adFinished`/`adError`,
/// `onOpen`/`onClose`/`onRewarded`, `adBreakDone`, `noShow`/`noBreak`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdOutcome {
    /// The ad displayed. For rewarded ads this means watched to
    /// completion - the reward was earned.
    Shown,
    /// The network had no inventory for this request.
    NoFill,
    /// Rewarded only: the player closed the ad before earning the reward.
    Dismissed,
    /// The foreign SDK reported a failure, already mapped to a shared code.
    Error(ErrorCode),
}

/// Result of the platform-loading bootstrap phase.
///
/// `AdBlocked` is the recoverable middle ground: the foreign script never
/// attached, but only because an ad blocker ate it - the game still runs,
/// with every ad request short-circuiting to no-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformReadiness {
    Ready,
    AdBlocked,
}

/// Ad unit ids fetched during bootstrap. All optional - platforms that
/// address units implicitly leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdUnitIds {
    pub interstitial: Option<String>,
    pub rewarded: Option<String>,
    pub banner: Option<String>,
}

/// The player as the platform reports it. An empty `id` means the
/// platform has no player identity; the Player capability then falls back
/// to a stable anonymous id from local storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    pub photo_url: String,
    pub platform_scoped_id: Option<String>,
    pub locale: Option<String>,
}

/// Per-platform implementation hooks, dispatched to by the capability
/// layer after validation. Implementations must never panic; failures are
/// values (`AdOutcome`, `SdkError`) so the uniform rejection path holds on
/// every platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// The platform this adapter serves.
    fn platform(&self) -> Platform;

    /// API names available on this platform, e.g. `"player.getDataAsync"`.
    fn supported_apis(&self) -> &'static [&'static str];

    /// Whether the platform can show a preroll placement.
    fn supports_preroll(&self) -> bool;

    // ------------------------------------------------------------------
    // Bootstrap
    // ------------------------------------------------------------------

    /// Load and attach the foreign SDK. Resolves `AdBlocked` instead of
    /// failing on platforms where a missing ad script means a blocker.
    async fn initialize_platform_async(&self) -> Result<PlatformReadiness, SdkError>;

    /// Run the foreign SDK's own initialization, once the script attached.
    async fn initialize_sdk_async(&self) -> Result<(), SdkError>;

    /// Fetch the ad unit ids for this game.
    async fn fetch_ad_units(&self) -> Result<AdUnitIds, SdkError>;

    /// Fetch the player as the platform knows them.
    async fn fetch_player(&self) -> Result<PlayerSnapshot, SdkError>;

    // ------------------------------------------------------------------
    // Ads
    // ------------------------------------------------------------------

    async fn show_interstitial_impl<'a>(
        &self,
        placement: AdPlacement,
        ad_unit_id: Option<&'a str>,
        description: &str,
    ) -> AdOutcome;

    async fn show_rewarded_impl<'a>(&self, ad_unit_id: Option<&'a str>, description: &str)
        -> AdOutcome;

    async fn show_banner_impl<'a>(
        &self,
        ad_unit_id: Option<&'a str>,
        visible: bool,
    ) -> Result<(), SdkError>;

    // ------------------------------------------------------------------
    // Session & identity
    // ------------------------------------------------------------------

    async fn authenticate_async_impl(&self) -> Result<bool, SdkError>;

    async fn link_account_async_impl(&self) -> Result<bool, SdkError>;

    fn on_pause_impl(&self, callback: PauseCallback);

    fn set_loading_progress_impl(&self, percent: u8);

    async fn get_entry_point_data_impl(&self) -> Result<serde_json::Value, SdkError>;

    // ------------------------------------------------------------------
    // Player data
    // ------------------------------------------------------------------

    async fn get_data_async_impl(&self, keys: &[String]) -> Result<serde_json::Value, SdkError>;

    async fn set_data_async_impl(&self, data: serde_json::Value) -> Result<(), SdkError>;
}
