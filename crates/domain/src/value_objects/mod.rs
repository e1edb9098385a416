//! Value objects owned by the capability layer.

pub mod ad;
pub mod ad_config;
pub mod analytics;
pub mod player;
pub mod session;

pub use ad::{AdFormat, AdPlacement};
pub use ad_config::{AdConfig, AdsenseSettings};
pub use analytics::AnalyticsEvent;
pub use player::PlayerProfile;
pub use session::SessionContext;
