//! Host environment ports: time, storage, script injection, and events.

use async_trait::async_trait;
use thiserror::Error;

/// Well-known local storage keys.
pub mod storage_keys {
    /// Stable anonymous player identity, generated on first use.
    pub const PLAYER_ID: &str = "hostbridge.player_id";
    /// RFC 3339 timestamp of the player's first session.
    pub const FIRST_PLAY_AT: &str = "hostbridge.first_play_at";
    /// Player data blob for platforms without cloud storage.
    pub const PLAYER_DATA: &str = "hostbridge.player_data";
}

/// Wall-clock access, injectable so tests control the session timer and
/// first-play day counting.
pub trait TimeProvider: Send + Sync {
    /// Current time as Unix timestamp in seconds.
    fn now_unix_secs(&self) -> u64;

    /// Current time in milliseconds since epoch.
    fn now_millis(&self) -> u64;
}

/// Key-value storage offered by the host (browser local storage, or a
/// file on native hosts). Values are plain strings; callers serialize.
pub trait StorageProvider: Send + Sync {
    /// Save a string value with the given key.
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found.
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key.
    fn remove(&self, key: &str);
}

/// Why a foreign SDK script failed to attach.
#[derive(Debug, Clone, Error)]
pub enum ScriptLoadError {
    /// The script tag fired `onerror` or the fetch failed outright.
    #[error("script failed to load: {0}")]
    LoadFailed(String),

    /// The script loaded but the expected global never appeared.
    #[error("script loaded but global `{0}` never appeared")]
    MissingGlobal(String),
}

/// Injects a foreign SDK `<script>` tag and reports on its globals.
///
/// Exactly one of success or failure is reported per injection. Note that
/// a load failure is not always fatal to bootstrap: ad-serving scripts are
/// the first thing ad blockers kill, and some platforms treat that as
/// "ad blocker detected" rather than an error (see the adapter layer).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    /// Inject the script and resolve once it loaded or failed.
    async fn inject(&self, url: &str) -> Result<(), ScriptLoadError>;

    /// Whether the named global object currently exists.
    fn global_exists(&self, name: &str) -> bool;
}

/// Dispatches a named event to the embedding page (`window` in a browser).
pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event_name: &str);
}
