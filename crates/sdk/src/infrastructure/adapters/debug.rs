//! Debug adapter - the no-platform platform.
//!
//! Used for local development, for unrecognized domains, and as the
//! fallback when a real platform fails to load. Every operation succeeds
//! with stub values so the game is always playable; player data persists
//! through the storage port instead of a cloud API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hostbridge_domain::{AdPlacement, Platform, SdkError};
use serde_json::{json, Value};

use crate::ports::outbound::{
    storage_keys, AdOutcome, AdUnitIds, PauseCallback, PlatformAdapter, PlatformReadiness,
    PlayerSnapshot, StorageProvider,
};

use super::descriptor::descriptor;

pub struct DebugAdapter {
    storage: Arc<dyn StorageProvider>,
    pause_callbacks: Mutex<Vec<PauseCallback>>,
}

impl DebugAdapter {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            storage,
            pause_callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Fire registered pause callbacks, as a platform would when the
    /// player backgrounds the game. Exposed for demos and tests.
    pub fn trigger_pause(&self) {
        match self.pause_callbacks.lock() {
            Ok(mut callbacks) => {
                for callback in callbacks.iter_mut() {
                    callback();
                }
            }
            Err(e) => tracing::error!("pause callback lock poisoned: {}", e),
        }
    }

    fn stored_data(&self) -> Value {
        self.storage
            .load(storage_keys::PLAYER_DATA)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_else(|| json!({}))
    }
}

#[async_trait]
impl PlatformAdapter for DebugAdapter {
    fn platform(&self) -> Platform {
        Platform::Debug
    }

    fn supported_apis(&self) -> &'static [&'static str] {
        descriptor(Platform::Debug).supported_apis
    }

    fn supports_preroll(&self) -> bool {
        true
    }

    async fn initialize_platform_async(&self) -> Result<PlatformReadiness, SdkError> {
        // No foreign SDK to load.
        Ok(PlatformReadiness::Ready)
    }

    async fn initialize_sdk_async(&self) -> Result<(), SdkError> {
        Ok(())
    }

    async fn fetch_ad_units(&self) -> Result<AdUnitIds, SdkError> {
        Ok(AdUnitIds {
            interstitial: Some("debug-interstitial".to_string()),
            rewarded: Some("debug-rewarded".to_string()),
            banner: Some("debug-banner".to_string()),
        })
    }

    async fn fetch_player(&self) -> Result<PlayerSnapshot, SdkError> {
        Ok(PlayerSnapshot {
            // Empty id: the Player capability assigns the stable anonymous
            // identity from storage.
            id: String::new(),
            name: "DebugPlayer".to_string(),
            photo_url: "https://images.hostbridge.dev/avatars/debug.png".to_string(),
            platform_scoped_id: None,
            locale: Some("en-US".to_string()),
        })
    }

    async fn show_interstitial_impl<'a>(
        &self,
        placement: AdPlacement,
        _ad_unit_id: Option<&'a str>,
        description: &str,
    ) -> AdOutcome {
        tracing::info!(%placement, description, "debug interstitial shown");
        AdOutcome::Shown
    }

    async fn show_rewarded_impl<'a>(
        &self,
        _ad_unit_id: Option<&'a str>,
        description: &str,
    ) -> AdOutcome {
        tracing::info!(description, "debug rewarded ad watched to completion");
        AdOutcome::Shown
    }

    async fn show_banner_impl<'a>(
        &self,
        _ad_unit_id: Option<&'a str>,
        visible: bool,
    ) -> Result<(), SdkError> {
        tracing::info!(visible, "debug banner toggled");
        Ok(())
    }

    async fn authenticate_async_impl(&self) -> Result<bool, SdkError> {
        Ok(true)
    }

    async fn link_account_async_impl(&self) -> Result<bool, SdkError> {
        Ok(true)
    }

    fn on_pause_impl(&self, callback: PauseCallback) {
        match self.pause_callbacks.lock() {
            Ok(mut callbacks) => callbacks.push(callback),
            Err(e) => tracing::error!("pause callback lock poisoned: {}", e),
        }
    }

    fn set_loading_progress_impl(&self, percent: u8) {
        tracing::debug!(percent, "loading progress");
    }

    async fn get_entry_point_data_impl(&self) -> Result<Value, SdkError> {
        Ok(json!({}))
    }

    async fn get_data_async_impl(&self, keys: &[String]) -> Result<Value, SdkError> {
        let stored = self.stored_data();
        let mut out = serde_json::Map::new();
        for key in keys {
            out.insert(key.clone(), stored.get(key).cloned().unwrap_or(Value::Null));
        }
        Ok(Value::Object(out))
    }

    async fn set_data_async_impl(&self, data: Value) -> Result<(), SdkError> {
        let mut stored = self.stored_data();
        if let (Some(target), Some(updates)) = (stored.as_object_mut(), data.as_object()) {
            for (key, value) in updates {
                target.insert(key.clone(), value.clone());
            }
        }
        let raw = serde_json::to_string(&stored)
            .map_err(|e| SdkError::operation_failed(e.to_string(), "player.setDataAsync"))?;
        self.storage.save(storage_keys::PLAYER_DATA, &raw);
        Ok(())
    }
}
