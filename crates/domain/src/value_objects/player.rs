//! Player profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The player as reported by the platform, enriched with first-play
/// tracking from local storage.
///
/// Constructed by the Player capability's async initialize during
/// bootstrap; reads afterwards are synchronous. `is_first_play` and the
/// day count are write-once during that initialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub photo_url: String,
    pub is_first_play: bool,
    pub days_since_first_play: i64,
    /// Identity scoped to the platform's own account system, when the
    /// platform exposes one (e.g. ASID on Facebook).
    pub platform_scoped_id: Option<String>,
    /// When this player was first seen, from local storage.
    pub first_play_at: Option<DateTime<Utc>>,
}

impl Default for PlayerProfile {
    /// Placeholder values returned by getters before bootstrap completes.
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            photo_url: String::new(),
            is_first_play: false,
            days_since_first_play: 0,
            platform_scoped_id: None,
            first_play_at: None,
        }
    }
}

impl PlayerProfile {
    /// True once the profile has been populated from the platform.
    pub fn is_initialized(&self) -> bool {
        !self.id.is_empty()
    }
}
