//! Capability services.
//!
//! One service per capability family (Ads, Analytics, Player, Core, plus
//! the Iap/Leaderboard facades), all following the same pattern: public
//! method, then validation, then dispatch to the platform adapter selected
//! at startup. Validation failures produce a typed error and perform no
//! side effects; nothing platform-specific is visible past this layer.

pub mod ads;
pub mod analytics;
pub mod core;
pub mod dispatch;
pub mod iap;
pub mod leaderboard;
pub mod orchestrator;
pub mod player;
pub mod validation;

pub use self::ads::{AdCallback, AdCallbacks, AdsCapability};
pub use self::analytics::AnalyticsCapability;
pub use self::core::CoreCapability;
pub use self::dispatch::AdapterSlot;
pub use self::iap::IapCapability;
pub use self::leaderboard::LeaderboardCapability;
pub use self::orchestrator::Orchestrator;
pub use self::player::PlayerCapability;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Read a lock, recovering the guard if a panicking writer poisoned it.
pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write a lock, recovering the guard if a panicking writer poisoned it.
pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
