//! Default port implementations for hosts without a browser.
//!
//! Real embeddings supply DOM-backed implementations of these ports; the
//! defaults here keep the SDK usable headless (demos, tests, server-side
//! rendering of game shells).

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use hostbridge_domain::AdPlacement;
use serde_json::Value;

use crate::ports::outbound::{
    AdOutcome, AdUnitIds, AnalyticsTransport, ForeignError, ForeignSdk, PauseCallback,
    PlayerSnapshot, ScriptLoadError, ScriptLoader, StorageProvider, TimeProvider,
};

/// Wall clock from `std::time`.
#[derive(Clone, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_unix_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// In-memory key-value storage. Browser embeddings use local storage
/// instead; this keeps headless sessions working for one process lifetime.
#[derive(Default)]
pub struct MemoryStorage {
    cache: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for MemoryStorage {
    fn save(&self, key: &str, value: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_string());
            }
            Err(e) => tracing::error!("storage lock poisoned: {}", e),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.cache.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("storage lock poisoned: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.remove(key);
            }
            Err(e) => tracing::error!("storage lock poisoned: {}", e),
        }
    }
}

/// Script loader for hosts without a DOM: every injection fails.
///
/// Combined with the per-platform failure policy this means ad-serving
/// platforms degrade to the ad-blocked path and the rest fall back to the
/// debug adapter - a headless run is always playable.
#[derive(Clone, Default)]
pub struct NullScriptLoader;

#[async_trait]
impl ScriptLoader for NullScriptLoader {
    async fn inject(&self, url: &str) -> Result<(), ScriptLoadError> {
        Err(ScriptLoadError::LoadFailed(format!(
            "no DOM available to inject {url}"
        )))
    }

    fn global_exists(&self, _name: &str) -> bool {
        false
    }
}

/// A foreign SDK surface with no binding behind it.
///
/// Stands in wherever a concrete binding was not supplied; every call
/// reports the platform vocabulary's unsupported-operation code so the
/// translation table turns it into a uniform `NOT_SUPPORTED` rejection.
#[derive(Clone, Default)]
pub struct UnboundForeignSdk;

impl UnboundForeignSdk {
    fn unbound(&self) -> ForeignError {
        ForeignError::new("UNSUPPORTED_OPERATION", "no foreign SDK binding supplied")
    }
}

#[async_trait]
impl ForeignSdk for UnboundForeignSdk {
    async fn init(&self) -> Result<(), ForeignError> {
        Err(self.unbound())
    }

    async fn fetch_ad_units(&self) -> Result<AdUnitIds, ForeignError> {
        Err(self.unbound())
    }

    async fn fetch_player(&self) -> Result<PlayerSnapshot, ForeignError> {
        Err(self.unbound())
    }

    async fn request_interstitial<'a>(
        &self,
        _placement: AdPlacement,
        _ad_unit_id: Option<&'a str>,
        _description: &str,
    ) -> AdOutcome {
        AdOutcome::NoFill
    }

    async fn request_rewarded<'a>(
        &self,
        _ad_unit_id: Option<&'a str>,
        _description: &str,
    ) -> AdOutcome {
        AdOutcome::NoFill
    }

    async fn set_banner<'a>(
        &self,
        _ad_unit_id: Option<&'a str>,
        _visible: bool,
    ) -> Result<(), ForeignError> {
        Err(self.unbound())
    }

    async fn authenticate(&self) -> Result<bool, ForeignError> {
        Err(self.unbound())
    }

    async fn link_account(&self) -> Result<bool, ForeignError> {
        Err(self.unbound())
    }

    async fn entry_point_data(&self) -> Result<Value, ForeignError> {
        Err(self.unbound())
    }

    async fn get_data(&self, _keys: &[String]) -> Result<Value, ForeignError> {
        Err(self.unbound())
    }

    async fn set_data(&self, _data: Value) -> Result<(), ForeignError> {
        Err(self.unbound())
    }

    fn register_pause(&self, _callback: PauseCallback) {}

    fn set_loading_progress(&self, _percent: u8) {}
}

/// Analytics transport that logs events instead of delivering them.
#[derive(Clone, Default)]
pub struct TracingAnalyticsTransport;

#[async_trait]
impl AnalyticsTransport for TracingAnalyticsTransport {
    async fn send(&self, payload: Value) -> anyhow::Result<()> {
        tracing::info!(%payload, "analytics event");
        Ok(())
    }
}
