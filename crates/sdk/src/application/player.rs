//! Player capability.
//!
//! The profile is fetched once during bootstrap; reads afterwards are
//! synchronous getters. First-play tracking lives in local storage: the
//! first session stamps a timestamp, later sessions derive the day count
//! from it. Platforms without a player identity (or with their script
//! blocked) get a stable anonymous id, also from storage.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use hostbridge_domain::{PlayerProfile, SdkError};
use serde_json::Value;

use crate::ports::outbound::{storage_keys, StorageProvider, TimeProvider};
use crate::state::BootObserver;

use super::dispatch::AdapterSlot;
use super::validation::ValidationError;
use super::{read_lock, write_lock};

pub const API_GET_DATA: &str = "player.getDataAsync";
pub const API_SET_DATA: &str = "player.setDataAsync";

pub struct PlayerCapability {
    slot: Arc<AdapterSlot>,
    storage: Arc<dyn StorageProvider>,
    time: Arc<dyn TimeProvider>,
    profile: RwLock<PlayerProfile>,
    boot: BootObserver,
    ready_timeout: Duration,
}

impl PlayerCapability {
    pub fn new(
        slot: Arc<AdapterSlot>,
        storage: Arc<dyn StorageProvider>,
        time: Arc<dyn TimeProvider>,
        boot: BootObserver,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            slot,
            storage,
            time,
            profile: RwLock::new(PlayerProfile::default()),
            boot,
            ready_timeout,
        }
    }

    // ------------------------------------------------------------------
    // Bootstrap hook (orchestrator only)
    // ------------------------------------------------------------------

    /// Build the profile from the platform snapshot plus local first-play
    /// tracking. Returns the platform-reported locale, if any.
    pub(crate) async fn initialize(&self) -> Result<Option<String>, SdkError> {
        let snapshot = self.slot.get().fetch_player().await?;

        let id = if snapshot.id.is_empty() {
            self.anonymous_id()
        } else {
            snapshot.id
        };
        let (is_first_play, first_play_at, days_since_first_play) = self.first_play();

        let mut profile = write_lock(&self.profile);
        *profile = PlayerProfile {
            id,
            name: snapshot.name,
            photo_url: snapshot.photo_url,
            is_first_play,
            days_since_first_play,
            platform_scoped_id: snapshot.platform_scoped_id,
            first_play_at: Some(first_play_at),
        };
        Ok(snapshot.locale)
    }

    /// Stable anonymous identity, persisted until storage is cleared.
    fn anonymous_id(&self) -> String {
        if let Some(existing) = self.storage.load(storage_keys::PLAYER_ID) {
            return existing;
        }
        let new_id = format!("player-{}", uuid::Uuid::new_v4());
        self.storage.save(storage_keys::PLAYER_ID, &new_id);
        new_id
    }

    fn now(&self) -> DateTime<Utc> {
        match Utc.timestamp_millis_opt(self.time.now_millis() as i64) {
            chrono::LocalResult::Single(now) => now,
            _ => DateTime::<Utc>::MIN_UTC,
        }
    }

    fn first_play(&self) -> (bool, DateTime<Utc>, i64) {
        let now = self.now();
        match self
            .storage
            .load(storage_keys::FIRST_PLAY_AT)
            .and_then(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            }) {
            Some(first) => (false, first, (now - first).num_days().max(0)),
            None => {
                self.storage
                    .save(storage_keys::FIRST_PLAY_AT, &now.to_rfc3339());
                (true, now, 0)
            }
        }
    }

    // ------------------------------------------------------------------
    // Synchronous getters
    // ------------------------------------------------------------------

    pub fn id(&self) -> String {
        read_lock(&self.profile).id.clone()
    }

    pub fn name(&self) -> String {
        read_lock(&self.profile).name.clone()
    }

    pub fn photo(&self) -> String {
        read_lock(&self.profile).photo_url.clone()
    }

    pub fn is_first_play(&self) -> bool {
        read_lock(&self.profile).is_first_play
    }

    pub fn days_since_first_play(&self) -> i64 {
        read_lock(&self.profile).days_since_first_play
    }

    pub fn platform_scoped_id(&self) -> Option<String> {
        read_lock(&self.profile).platform_scoped_id.clone()
    }

    /// Snapshot of the whole profile.
    pub fn profile(&self) -> PlayerProfile {
        read_lock(&self.profile).clone()
    }

    // ------------------------------------------------------------------
    // Platform data
    // ------------------------------------------------------------------

    /// Fetch the values stored under `keys` from the platform's storage.
    pub async fn get_data_async(&self, keys: &[String]) -> Result<Value, SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_GET_DATA)
            .await?;
        if keys.is_empty() {
            return Err(
                ValidationError::invalid("at least one key is required").into_error(API_GET_DATA)
            );
        }
        let adapter = self.slot.get();
        if !adapter.supported_apis().contains(&API_GET_DATA) {
            return Err(SdkError::not_supported(API_GET_DATA));
        }
        adapter.get_data_async_impl(keys).await
    }

    /// Merge `data` into the platform's storage.
    pub async fn set_data_async(&self, data: Value) -> Result<(), SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_SET_DATA)
            .await?;
        if !data.is_object() {
            return Err(
                ValidationError::invalid("data must be a JSON object").into_error(API_SET_DATA)
            );
        }
        let adapter = self.slot.get();
        if !adapter.supported_apis().contains(&API_SET_DATA) {
            return Err(SdkError::not_supported(API_SET_DATA));
        }
        adapter.set_data_async_impl(data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::providers::MemoryStorage;
    use crate::infrastructure::testing::{ManualClock, ScriptedAdapter};
    use crate::ports::outbound::PlatformAdapter;
    use crate::state::BootSignal;
    use hostbridge_domain::Platform;

    const DAY_MILLIS: u64 = 24 * 60 * 60 * 1000;

    fn player_with(
        adapter: Arc<dyn PlatformAdapter>,
        storage: Arc<MemoryStorage>,
        clock: Arc<ManualClock>,
    ) -> PlayerCapability {
        let signal = BootSignal::new(true);
        signal.mark_platform_initialized();
        PlayerCapability::new(
            Arc::new(AdapterSlot::new(adapter)),
            storage,
            clock,
            signal.observer(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_getters_return_defaults_before_initialize() {
        let player = player_with(
            Arc::new(ScriptedAdapter::new(Platform::Debug)),
            Arc::new(MemoryStorage::new()),
            Arc::new(ManualClock::at_millis(0)),
        );

        assert_eq!(player.id(), "");
        assert_eq!(player.name(), "");
        assert!(!player.is_first_play());
        assert_eq!(player.days_since_first_play(), 0);
    }

    #[tokio::test]
    async fn test_first_session_stamps_first_play() {
        let storage = Arc::new(MemoryStorage::new());
        let player = player_with(
            Arc::new(ScriptedAdapter::new(Platform::Debug)),
            Arc::clone(&storage),
            Arc::new(ManualClock::at_millis(5 * DAY_MILLIS)),
        );

        player.initialize().await.expect("initializes");

        assert!(player.is_first_play());
        assert_eq!(player.days_since_first_play(), 0);
        assert!(storage.load(storage_keys::FIRST_PLAY_AT).is_some());
    }

    #[tokio::test]
    async fn test_returning_player_counts_days() {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::at_millis(DAY_MILLIS));

        let first = player_with(
            Arc::new(ScriptedAdapter::new(Platform::Debug)),
            Arc::clone(&storage),
            Arc::clone(&clock),
        );
        first.initialize().await.expect("first session");

        clock.advance(Duration::from_millis(5 * DAY_MILLIS));
        let second = player_with(
            Arc::new(ScriptedAdapter::new(Platform::Debug)),
            Arc::clone(&storage),
            clock,
        );
        second.initialize().await.expect("second session");

        assert!(!second.is_first_play());
        assert_eq!(second.days_since_first_play(), 5);
    }

    #[tokio::test]
    async fn test_anonymous_id_is_stable_across_sessions() {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::at_millis(0));

        // The debug adapter reports no platform identity.
        let first = player_with(
            Arc::new(crate::infrastructure::adapters::DebugAdapter::new(
                Arc::clone(&storage) as Arc<dyn StorageProvider>,
            )),
            Arc::clone(&storage),
            Arc::clone(&clock),
        );
        first.initialize().await.expect("first session");
        let id = first.id();
        assert!(id.starts_with("player-"));

        let second = player_with(
            Arc::new(crate::infrastructure::adapters::DebugAdapter::new(
                Arc::clone(&storage) as Arc<dyn StorageProvider>,
            )),
            Arc::clone(&storage),
            clock,
        );
        second.initialize().await.expect("second session");
        assert_eq!(second.id(), id);
    }

    #[tokio::test]
    async fn test_get_data_requires_keys() {
        let player = player_with(
            Arc::new(ScriptedAdapter::new(Platform::Debug)),
            Arc::new(MemoryStorage::new()),
            Arc::new(ManualClock::at_millis(0)),
        );

        let err = player.get_data_async(&[]).await.expect_err("no keys");
        assert_eq!(err.code, hostbridge_domain::ErrorCode::InvalidParam);
    }

    #[tokio::test]
    async fn test_data_api_unsupported_platform_rejects_uniformly() {
        // GameDistribution declares no player data APIs.
        let player = player_with(
            Arc::new(ScriptedAdapter::new(Platform::Gd)),
            Arc::new(MemoryStorage::new()),
            Arc::new(ManualClock::at_millis(0)),
        );

        let err = player
            .get_data_async(&["coins".to_string()])
            .await
            .expect_err("gd has no cloud data");
        assert_eq!(err.code, hostbridge_domain::ErrorCode::NotSupported);
    }
}
