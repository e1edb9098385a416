//! Outbound ports - interfaces for the host environment.
//!
//! These ports define the contracts that infrastructure adapters must
//! implement, so the capability layer can talk to the browser, the storage
//! layer, and the foreign platform SDKs without depending on concrete
//! implementations.

pub mod adapter;
pub mod analytics;
pub mod foreign;
pub mod platform;

pub use adapter::{
    AdOutcome, AdUnitIds, PauseCallback, PlatformAdapter, PlatformReadiness, PlayerSnapshot,
};
pub use analytics::AnalyticsTransport;
pub use foreign::{ForeignError, ForeignSdk};
pub use platform::{
    storage_keys, EventDispatcher, ScriptLoadError, ScriptLoader, StorageProvider, TimeProvider,
};
