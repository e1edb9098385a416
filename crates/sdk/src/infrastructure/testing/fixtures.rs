//! Test doubles shared by unit tests across the crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hostbridge_domain::{AdPlacement, Platform, SdkError};
use serde_json::{json, Value};

use crate::infrastructure::adapters::descriptor::descriptor;
use crate::ports::outbound::{
    AdOutcome, AdUnitIds, AnalyticsTransport, EventDispatcher, PauseCallback, PlatformAdapter,
    PlatformReadiness, PlayerSnapshot, TimeProvider,
};

/// Clock under test control.
#[derive(Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    pub fn at_millis(millis: u64) -> Self {
        Self {
            millis: AtomicU64::new(millis),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl TimeProvider for ManualClock {
    fn now_unix_secs(&self) -> u64 {
        self.millis.load(Ordering::SeqCst) / 1000
    }

    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Records dispatched event names.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl EventDispatcher for RecordingDispatcher {
    fn dispatch(&self, event_name: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event_name.to_string());
        }
    }
}

/// Records analytics payloads instead of delivering them.
#[derive(Clone, Default)]
pub struct RecordingAnalytics {
    sent: Arc<Mutex<Vec<Value>>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Payloads whose event name matches.
    pub fn sent_named(&self, name: &str) -> Vec<Value> {
        self.sent()
            .into_iter()
            .filter(|p| p["name"] == name)
            .collect()
    }
}

#[async_trait]
impl AnalyticsTransport for RecordingAnalytics {
    async fn send(&self, payload: Value) -> anyhow::Result<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(payload);
        }
        Ok(())
    }
}

/// Adapter whose ad outcomes follow a script.
///
/// Outcomes are popped per foreign ad request; when the script runs dry
/// the adapter keeps answering `Shown`. Call counters expose how many
/// foreign requests were actually made.
pub struct ScriptedAdapter {
    platform: Platform,
    supports_preroll: bool,
    outcomes: Mutex<VecDeque<AdOutcome>>,
    auth_delay: Option<Duration>,
    fail_player_fetch: bool,
    pub interstitial_calls: AtomicU32,
    pub rewarded_calls: AtomicU32,
    pub banner_calls: AtomicU32,
}

impl ScriptedAdapter {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            supports_preroll: true,
            outcomes: Mutex::new(VecDeque::new()),
            auth_delay: None,
            fail_player_fetch: false,
            interstitial_calls: AtomicU32::new(0),
            rewarded_calls: AtomicU32::new(0),
            banner_calls: AtomicU32::new(0),
        }
    }

    pub fn with_outcomes(self, outcomes: impl IntoIterator<Item = AdOutcome>) -> Self {
        if let Ok(mut queue) = self.outcomes.lock() {
            queue.extend(outcomes);
        }
        self
    }

    pub fn without_preroll(mut self) -> Self {
        self.supports_preroll = false;
        self
    }

    /// Make `authenticate` hang for the given duration before answering.
    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.auth_delay = Some(delay);
        self
    }

    pub fn failing_player_fetch(mut self) -> Self {
        self.fail_player_fetch = true;
        self
    }

    fn next_outcome(&self) -> AdOutcome {
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or(AdOutcome::Shown)
    }

    pub fn foreign_ad_calls(&self) -> u32 {
        self.interstitial_calls.load(Ordering::SeqCst)
            + self.rewarded_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlatformAdapter for ScriptedAdapter {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn supported_apis(&self) -> &'static [&'static str] {
        descriptor(self.platform).supported_apis
    }

    fn supports_preroll(&self) -> bool {
        self.supports_preroll
    }

    async fn initialize_platform_async(&self) -> Result<PlatformReadiness, SdkError> {
        Ok(PlatformReadiness::Ready)
    }

    async fn initialize_sdk_async(&self) -> Result<(), SdkError> {
        Ok(())
    }

    async fn fetch_ad_units(&self) -> Result<AdUnitIds, SdkError> {
        Ok(AdUnitIds::default())
    }

    async fn fetch_player(&self) -> Result<PlayerSnapshot, SdkError> {
        if self.fail_player_fetch {
            return Err(SdkError::operation_failed(
                "player service unavailable",
                "initializeAsync",
            ));
        }
        Ok(PlayerSnapshot {
            id: "scripted-player".to_string(),
            name: "Scripted".to_string(),
            photo_url: String::new(),
            platform_scoped_id: None,
            locale: Some("en-US".to_string()),
        })
    }

    async fn show_interstitial_impl<'a>(
        &self,
        _placement: AdPlacement,
        _ad_unit_id: Option<&'a str>,
        _description: &str,
    ) -> AdOutcome {
        self.interstitial_calls.fetch_add(1, Ordering::SeqCst);
        self.next_outcome()
    }

    async fn show_rewarded_impl<'a>(
        &self,
        _ad_unit_id: Option<&'a str>,
        _description: &str,
    ) -> AdOutcome {
        self.rewarded_calls.fetch_add(1, Ordering::SeqCst);
        self.next_outcome()
    }

    async fn show_banner_impl<'a>(
        &self,
        _ad_unit_id: Option<&'a str>,
        _visible: bool,
    ) -> Result<(), SdkError> {
        self.banner_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn authenticate_async_impl(&self) -> Result<bool, SdkError> {
        if let Some(delay) = self.auth_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(true)
    }

    async fn link_account_async_impl(&self) -> Result<bool, SdkError> {
        Ok(true)
    }

    fn on_pause_impl(&self, _callback: PauseCallback) {}

    fn set_loading_progress_impl(&self, _percent: u8) {}

    async fn get_entry_point_data_impl(&self) -> Result<Value, SdkError> {
        Ok(json!({"from": "scripted"}))
    }

    async fn get_data_async_impl(&self, _keys: &[String]) -> Result<Value, SdkError> {
        Ok(json!({}))
    }

    async fn set_data_async_impl(&self, _data: Value) -> Result<(), SdkError> {
        Ok(())
    }
}
