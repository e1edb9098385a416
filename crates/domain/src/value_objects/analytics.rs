//! Analytics event vocabulary.
//!
//! Typed constructors for every event the SDK emits. Payload shapes here
//! are the SDK-side contract; the transport wire format is an external
//! concern behind the analytics port.

use serde::{Deserialize, Serialize};

use super::ad::{AdFormat, AdPlacement};

/// One analytics event. Serialized as `{"event": ..., fields...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum AnalyticsEvent {
    /// Emitted exactly once, when bootstrap reaches the Ready state.
    GameStart,
    /// Emitted when the game reports the session is over.
    GameEnd,
    LevelStart {
        level: String,
    },
    LevelEnd {
        level: String,
        score: String,
        was_completed: bool,
    },
    GameChoice {
        decision: String,
        choice: String,
    },
    /// Emitted exactly once per terminal ad request.
    AdCall {
        format: AdFormat,
        placement: AdPlacement,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        viewed_reward: Option<bool>,
    },
}

impl AnalyticsEvent {
    /// The event name, as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::GameStart => "GameStart",
            AnalyticsEvent::GameEnd => "GameEnd",
            AnalyticsEvent::LevelStart { .. } => "LevelStart",
            AnalyticsEvent::LevelEnd { .. } => "LevelEnd",
            AnalyticsEvent::GameChoice { .. } => "GameChoice",
            AnalyticsEvent::AdCall { .. } => "AdCall",
        }
    }
}
