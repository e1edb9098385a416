//! Shared adapter for every platform with a hosted foreign SDK.
//!
//! Parameterized by a [`PlatformDescriptor`] and a [`ForeignSdk`] binding;
//! this one type covers the dozen scripted platforms. What actually varies
//! per platform lives in the descriptor table and the out-of-scope foreign
//! binding, not here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hostbridge_domain::{AdPlacement, Platform, SdkError};

use crate::infrastructure::translation::translate_foreign_error;
use crate::ports::outbound::{
    AdOutcome, AdUnitIds, ForeignSdk, PauseCallback, PlatformAdapter, PlatformReadiness,
    PlayerSnapshot, ScriptLoader,
};

use super::descriptor::PlatformDescriptor;

/// How long to poll for a foreign global that attaches after `onload`.
const LATE_ATTACH_WINDOW: Duration = Duration::from_secs(3);
const LATE_ATTACH_POLL: Duration = Duration::from_millis(100);

/// Adapter for platforms whose SDK arrives via an injected script tag.
pub struct HostedAdapter {
    descriptor: &'static PlatformDescriptor,
    loader: Arc<dyn ScriptLoader>,
    foreign: Arc<dyn ForeignSdk>,
    /// Set during platform loading when the script failure policy says
    /// "blocker, not breakage". Once set, no foreign call is attempted.
    ad_blocked: AtomicBool,
}

impl HostedAdapter {
    pub fn new(
        descriptor: &'static PlatformDescriptor,
        loader: Arc<dyn ScriptLoader>,
        foreign: Arc<dyn ForeignSdk>,
    ) -> Self {
        Self {
            descriptor,
            loader,
            foreign,
            ad_blocked: AtomicBool::new(false),
        }
    }

    fn is_ad_blocked(&self) -> bool {
        self.ad_blocked.load(Ordering::SeqCst)
    }

    /// Apply the platform's script-failure policy: either a detected ad
    /// blocker (recoverable) or a failed bootstrap phase.
    fn judge_script_failure(&self, reason: &str) -> Result<PlatformReadiness, SdkError> {
        if self.descriptor.script_failure_is_ad_block {
            tracing::warn!(
                platform = %self.descriptor.platform,
                reason,
                "foreign SDK script blocked; continuing with ads disabled"
            );
            self.ad_blocked.store(true, Ordering::SeqCst);
            Ok(PlatformReadiness::AdBlocked)
        } else {
            Err(SdkError::initialization(format!(
                "platform script failed to attach: {reason}"
            )))
        }
    }

    /// Wait for a global that attaches after `onload`.
    async fn await_global(&self, name: &str) -> bool {
        let deadline = tokio::time::Instant::now() + LATE_ATTACH_WINDOW;
        while tokio::time::Instant::now() < deadline {
            if self.loader.global_exists(name) {
                return true;
            }
            tokio::time::sleep(LATE_ATTACH_POLL).await;
        }
        self.loader.global_exists(name)
    }

    fn translate(&self, api: &str, err: crate::ports::outbound::ForeignError) -> SdkError {
        translate_foreign_error(self.descriptor.platform, api, err)
    }
}

#[async_trait]
impl PlatformAdapter for HostedAdapter {
    fn platform(&self) -> Platform {
        self.descriptor.platform
    }

    fn supported_apis(&self) -> &'static [&'static str] {
        self.descriptor.supported_apis
    }

    fn supports_preroll(&self) -> bool {
        self.descriptor.supports_preroll
    }

    async fn initialize_platform_async(&self) -> Result<PlatformReadiness, SdkError> {
        let Some(url) = self.descriptor.sdk_url else {
            return Ok(PlatformReadiness::Ready);
        };

        if let Err(e) = self.loader.inject(url).await {
            return self.judge_script_failure(&e.to_string());
        }

        if let Some(global) = self.descriptor.sdk_global {
            let attached = if self.loader.global_exists(global) {
                true
            } else if self.descriptor.late_global_attach {
                self.await_global(global).await
            } else {
                false
            };
            if !attached {
                return self.judge_script_failure(&format!("global `{global}` missing"));
            }
        }

        Ok(PlatformReadiness::Ready)
    }

    async fn initialize_sdk_async(&self) -> Result<(), SdkError> {
        if self.is_ad_blocked() {
            // Nothing to initialize; the foreign SDK never attached.
            return Ok(());
        }
        self.foreign
            .init()
            .await
            .map_err(|e| self.translate("initializeAsync", e))
    }

    async fn fetch_ad_units(&self) -> Result<AdUnitIds, SdkError> {
        if self.is_ad_blocked() {
            return Ok(AdUnitIds::default());
        }
        self.foreign
            .fetch_ad_units()
            .await
            .map_err(|e| self.translate("initializeAsync", e))
    }

    async fn fetch_player(&self) -> Result<PlayerSnapshot, SdkError> {
        if self.is_ad_blocked() {
            // No platform identity available; the Player capability falls
            // back to a stored anonymous id.
            return Ok(PlayerSnapshot::default());
        }
        self.foreign
            .fetch_player()
            .await
            .map_err(|e| self.translate("initializeAsync", e))
    }

    async fn show_interstitial_impl<'a>(
        &self,
        placement: AdPlacement,
        ad_unit_id: Option<&'a str>,
        description: &str,
    ) -> AdOutcome {
        if self.is_ad_blocked() {
            return AdOutcome::NoFill;
        }
        self.foreign
            .request_interstitial(placement, ad_unit_id, description)
            .await
    }

    async fn show_rewarded_impl<'a>(
        &self,
        ad_unit_id: Option<&'a str>,
        description: &str,
    ) -> AdOutcome {
        if self.is_ad_blocked() {
            return AdOutcome::NoFill;
        }
        self.foreign.request_rewarded(ad_unit_id, description).await
    }

    async fn show_banner_impl<'a>(
        &self,
        ad_unit_id: Option<&'a str>,
        visible: bool,
    ) -> Result<(), SdkError> {
        if self.is_ad_blocked() {
            return Ok(());
        }
        self.foreign
            .set_banner(ad_unit_id, visible)
            .await
            .map_err(|e| self.translate("ads.showBanner", e))
    }

    async fn authenticate_async_impl(&self) -> Result<bool, SdkError> {
        self.foreign
            .authenticate()
            .await
            .map_err(|e| self.translate("core.authenticateAsync", e))
    }

    async fn link_account_async_impl(&self) -> Result<bool, SdkError> {
        self.foreign
            .link_account()
            .await
            .map_err(|e| self.translate("core.linkAccountAsync", e))
    }

    fn on_pause_impl(&self, callback: PauseCallback) {
        self.foreign.register_pause(callback);
    }

    fn set_loading_progress_impl(&self, percent: u8) {
        self.foreign.set_loading_progress(percent);
    }

    async fn get_entry_point_data_impl(&self) -> Result<serde_json::Value, SdkError> {
        self.foreign
            .entry_point_data()
            .await
            .map_err(|e| self.translate("session.getEntryPointData", e))
    }

    async fn get_data_async_impl(&self, keys: &[String]) -> Result<serde_json::Value, SdkError> {
        self.foreign
            .get_data(keys)
            .await
            .map_err(|e| self.translate("player.getDataAsync", e))
    }

    async fn set_data_async_impl(&self, data: serde_json::Value) -> Result<(), SdkError> {
        self.foreign
            .set_data(data)
            .await
            .map_err(|e| self.translate("player.setDataAsync", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::descriptor::descriptor;
    use crate::ports::outbound::platform::{MockScriptLoader, ScriptLoadError};
    use crate::ports::outbound::foreign::MockForeignSdk;

    fn hosted(
        platform: Platform,
        loader: MockScriptLoader,
        foreign: MockForeignSdk,
    ) -> HostedAdapter {
        HostedAdapter::new(descriptor(platform), Arc::new(loader), Arc::new(foreign))
    }

    #[tokio::test]
    async fn test_script_failure_on_ad_serving_platform_degrades_to_ad_block() {
        let mut loader = MockScriptLoader::new();
        loader
            .expect_inject()
            .returning(|_| Err(ScriptLoadError::LoadFailed("blocked".into())));
        let adapter = hosted(Platform::Wortal, loader, MockForeignSdk::new());

        let readiness = adapter
            .initialize_platform_async()
            .await
            .expect("degrades, does not fail");
        assert_eq!(readiness, PlatformReadiness::AdBlocked);

        // Every ad request now short-circuits without a foreign call; the
        // MockForeignSdk would panic on any unexpected invocation.
        let outcome = adapter
            .show_interstitial_impl(AdPlacement::Next, None, "level 2")
            .await;
        assert_eq!(outcome, AdOutcome::NoFill);
    }

    #[tokio::test]
    async fn test_script_failure_on_non_ad_platform_is_fatal() {
        let mut loader = MockScriptLoader::new();
        loader
            .expect_inject()
            .returning(|_| Err(ScriptLoadError::LoadFailed("404".into())));
        let adapter = hosted(Platform::Viber, loader, MockForeignSdk::new());

        let err = adapter
            .initialize_platform_async()
            .await
            .expect_err("viber cannot run without its SDK");
        assert_eq!(err.code, hostbridge_domain::ErrorCode::InitializationError);
    }

    #[tokio::test]
    async fn test_missing_global_counts_as_failure() {
        let mut loader = MockScriptLoader::new();
        loader.expect_inject().returning(|_| Ok(()));
        loader.expect_global_exists().return_const(false);
        let adapter = hosted(Platform::Viber, loader, MockForeignSdk::new());

        adapter
            .initialize_platform_async()
            .await
            .expect_err("global never attached");
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_attaching_global_is_polled_for() {
        let mut loader = MockScriptLoader::new();
        loader.expect_inject().returning(|_| Ok(()));
        // Global absent on the first two checks, present afterwards -
        // mirrors Telegram attaching its proxy after onload.
        let mut checks = 0;
        loader.expect_global_exists().returning_st(move |_| {
            checks += 1;
            checks > 2
        });
        let adapter = hosted(Platform::Telegram, loader, MockForeignSdk::new());

        let readiness = adapter
            .initialize_platform_async()
            .await
            .expect("attaches within the window");
        assert_eq!(readiness, PlatformReadiness::Ready);
    }

    #[tokio::test]
    async fn test_foreign_errors_are_translated() {
        let mut loader = MockScriptLoader::new();
        loader.expect_inject().returning(|_| Ok(()));
        loader.expect_global_exists().return_const(true);
        let mut foreign = MockForeignSdk::new();
        foreign.expect_authenticate().returning(|| {
            Err(crate::ports::outbound::ForeignError::new(
                "PENDING_REQUEST",
                "dialog open",
            ))
        });
        let adapter = hosted(Platform::Facebook, loader, foreign);

        let err = adapter
            .authenticate_async_impl()
            .await
            .expect_err("foreign error propagates");
        assert_eq!(err.code, hostbridge_domain::ErrorCode::AuthInProgress);
    }
}
