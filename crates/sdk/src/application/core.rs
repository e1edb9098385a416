//! Core capability: loading progress, pause hook, supported-API
//! discovery, and the authentication flows.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use hostbridge_domain::{SdkError, SessionContext};
use serde_json::Value;

use crate::state::BootObserver;

use super::dispatch::AdapterSlot;
use super::read_lock;

pub const API_AUTHENTICATE: &str = "core.authenticateAsync";
pub const API_LINK_ACCOUNT: &str = "core.linkAccountAsync";
pub const API_ENTRY_POINT_DATA: &str = "session.getEntryPointData";

/// Bound on the nested-iframe authentication status check. Expiry
/// degrades to "not authenticated" rather than rejecting.
pub const AUTH_STATUS_TIMEOUT: Duration = Duration::from_secs(2);

pub struct CoreCapability {
    slot: Arc<AdapterSlot>,
    boot: BootObserver,
    session: Arc<RwLock<SessionContext>>,
    ready_timeout: Duration,
}

impl CoreCapability {
    pub fn new(
        slot: Arc<AdapterSlot>,
        boot: BootObserver,
        session: Arc<RwLock<SessionContext>>,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            slot,
            boot,
            session,
            ready_timeout,
        }
    }

    /// API names available on the current platform.
    pub fn get_supported_apis(&self) -> Vec<String> {
        self.slot
            .get()
            .supported_apis()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn supports_api(&self, api: &str) -> bool {
        self.slot.get().supported_apis().contains(&api)
    }

    /// Report loading progress to the platform. Clamped to 0-100.
    pub fn set_loading_progress(&self, percent: f64) {
        let clamped = if percent.is_finite() {
            percent.clamp(0.0, 100.0) as u8
        } else {
            0
        };
        self.slot.get().set_loading_progress_impl(clamped);
    }

    /// Register a callback fired when the platform pauses the game.
    pub fn on_pause(&self, callback: impl FnMut() + Send + 'static) {
        self.slot.get().on_pause_impl(Box::new(callback));
    }

    /// Snapshot of the session context.
    pub fn session(&self) -> SessionContext {
        read_lock(&self.session).clone()
    }

    /// Check whether the player is authenticated with the platform.
    ///
    /// The status check runs inside a nested iframe on several platforms
    /// and can stall there, so it is bounded: expiry answers `false`
    /// instead of failing the call.
    pub async fn authenticate_async(&self) -> Result<bool, SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_AUTHENTICATE)
            .await?;
        let adapter = self.slot.get();
        if !adapter.supported_apis().contains(&API_AUTHENTICATE) {
            return Err(SdkError::not_supported(API_AUTHENTICATE));
        }
        match tokio::time::timeout(AUTH_STATUS_TIMEOUT, adapter.authenticate_async_impl()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("authentication status check timed out; reporting unauthenticated");
                Ok(false)
            }
        }
    }

    /// Link the anonymous session to a platform account.
    pub async fn link_account_async(&self) -> Result<bool, SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_LINK_ACCOUNT)
            .await?;
        let adapter = self.slot.get();
        if !adapter.supported_apis().contains(&API_LINK_ACCOUNT) {
            return Err(SdkError::not_supported(API_LINK_ACCOUNT));
        }
        adapter.link_account_async_impl().await
    }

    /// Data the platform attached to the game's entry point (e.g. a
    /// shared challenge link).
    pub async fn get_entry_point_data(&self) -> Result<Value, SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_ENTRY_POINT_DATA)
            .await?;
        let adapter = self.slot.get();
        if !adapter.supported_apis().contains(&API_ENTRY_POINT_DATA) {
            return Err(SdkError::not_supported(API_ENTRY_POINT_DATA));
        }
        adapter.get_entry_point_data_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::ScriptedAdapter;
    use crate::ports::outbound::adapter::MockPlatformAdapter;
    use crate::ports::outbound::PlatformAdapter;
    use crate::state::BootSignal;
    use hostbridge_domain::{ErrorCode, Platform};

    fn core_with(adapter: Arc<dyn PlatformAdapter>) -> CoreCapability {
        let signal = BootSignal::new(true);
        signal.mark_platform_initialized();
        let session = Arc::new(RwLock::new(SessionContext::new(
            Platform::Debug,
            "g",
            "s",
            "US",
            "agent",
            0,
        )));
        CoreCapability::new(
            Arc::new(AdapterSlot::new(adapter)),
            signal.observer(),
            session,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_supported_apis_reflect_the_platform() {
        let core = core_with(Arc::new(ScriptedAdapter::new(Platform::Telegram)));
        let apis = core.get_supported_apis();

        assert!(apis.contains(&"player.getDataAsync".to_string()));
        assert!(!apis.contains(&"iap.getCatalogAsync".to_string()));
    }

    #[test]
    fn test_loading_progress_is_clamped() {
        let mut adapter = MockPlatformAdapter::new();
        adapter
            .expect_set_loading_progress_impl()
            .withf(|percent| *percent == 100)
            .times(1)
            .return_const(());
        adapter
            .expect_set_loading_progress_impl()
            .withf(|percent| *percent == 0)
            .times(2)
            .return_const(());

        let core = core_with(Arc::new(adapter));
        core.set_loading_progress(250.0);
        core.set_loading_progress(-3.0);
        core.set_loading_progress(f64::NAN);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_status_check_degrades_on_timeout() {
        let adapter =
            ScriptedAdapter::new(Platform::CrazyGames).with_auth_delay(Duration::from_secs(60));
        let core = core_with(Arc::new(adapter));

        let authenticated = core
            .authenticate_async()
            .await
            .expect("timeout is not an error");
        assert!(!authenticated);
    }

    #[tokio::test]
    async fn test_auth_unsupported_platform_rejects() {
        // Poki declares no authentication API.
        let core = core_with(Arc::new(ScriptedAdapter::new(Platform::Poki)));
        let err = core
            .authenticate_async()
            .await
            .expect_err("no auth on this platform");
        assert_eq!(err.code, ErrorCode::NotSupported);
    }
}
