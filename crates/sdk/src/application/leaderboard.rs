//! Leaderboard facade.
//!
//! Same shape as the in-app purchase facade: validation plus the uniform
//! `NOT_SUPPORTED` rejection until a platform binding provides the data.

use std::sync::Arc;

use hostbridge_domain::SdkError;
use serde::{Deserialize, Serialize};

use super::dispatch::AdapterSlot;
use super::validation::ValidationError;

pub const API_GET_ENTRIES: &str = "leaderboard.getEntriesAsync";
pub const API_SEND_ENTRY: &str = "leaderboard.sendEntryAsync";

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_name: String,
    pub score: i64,
}

pub struct LeaderboardCapability {
    slot: Arc<AdapterSlot>,
}

impl LeaderboardCapability {
    pub fn new(slot: Arc<AdapterSlot>) -> Self {
        Self { slot }
    }

    pub fn is_enabled(&self) -> bool {
        self.slot.get().supported_apis().contains(&API_GET_ENTRIES)
    }

    pub async fn get_entries_async(
        &self,
        leaderboard_name: &str,
        count: u32,
    ) -> Result<Vec<LeaderboardEntry>, SdkError> {
        if leaderboard_name.trim().is_empty() {
            return Err(ValidationError::invalid("leaderboard name may not be empty")
                .into_error(API_GET_ENTRIES));
        }
        if count == 0 {
            return Err(
                ValidationError::invalid("count must be at least 1").into_error(API_GET_ENTRIES)
            );
        }
        if !self.is_enabled() {
            return Err(SdkError::not_supported(API_GET_ENTRIES));
        }
        Err(SdkError::not_supported(API_GET_ENTRIES))
    }

    pub async fn send_entry_async(
        &self,
        leaderboard_name: &str,
        score: i64,
    ) -> Result<(), SdkError> {
        if leaderboard_name.trim().is_empty() {
            return Err(ValidationError::invalid("leaderboard name may not be empty")
                .into_error(API_SEND_ENTRY));
        }
        tracing::debug!(leaderboard_name, score, "leaderboard entry submitted");
        if !self.slot.get().supported_apis().contains(&API_SEND_ENTRY) {
            return Err(SdkError::not_supported(API_SEND_ENTRY));
        }
        Err(SdkError::not_supported(API_SEND_ENTRY))
    }
}
