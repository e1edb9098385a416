//! Hostbridge domain layer.
//!
//! Pure types shared by every capability: the closed set of hosting
//! platforms, the platform resolver, the ad model, session/player value
//! objects, and the error taxonomy. Nothing in this crate performs I/O or
//! touches an async runtime - everything is callable synchronously at
//! startup, before any foreign SDK has loaded.

pub mod error;
pub mod platform;
pub mod resolver;
pub mod value_objects;

pub use error::{ErrorCode, SdkError};
pub use platform::Platform;
pub use resolver::resolve;
pub use value_objects::{
    AdConfig, AdFormat, AdPlacement, AdsenseSettings, AnalyticsEvent, PlayerProfile,
    SessionContext,
};
