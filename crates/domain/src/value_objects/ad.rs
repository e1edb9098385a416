//! Ad placement and format vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorCode, SdkError};

/// Where in the game flow an ad is requested.
///
/// Closed set; anything else is rejected before reaching an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPlacement {
    /// Before the game UI is visible. At most once per session, load-time
    /// only, never retried.
    Preroll,
    /// Entering gameplay.
    Start,
    /// The player paused.
    Pause,
    /// Between levels or rounds.
    Next,
    /// Browsing menus or the map.
    Browse,
    /// A rewarded placement - only valid for `showRewarded`.
    Reward,
}

impl AdPlacement {
    /// All placements, in a stable order.
    pub fn all() -> &'static [AdPlacement] {
        &[
            AdPlacement::Preroll,
            AdPlacement::Start,
            AdPlacement::Pause,
            AdPlacement::Next,
            AdPlacement::Browse,
            AdPlacement::Reward,
        ]
    }

    /// The lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdPlacement::Preroll => "preroll",
            AdPlacement::Start => "start",
            AdPlacement::Pause => "pause",
            AdPlacement::Next => "next",
            AdPlacement::Browse => "browse",
            AdPlacement::Reward => "reward",
        }
    }
}

impl fmt::Display for AdPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdPlacement {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdPlacement::all()
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| {
                SdkError::new(
                    ErrorCode::InvalidParam,
                    format!("unknown ad placement: {s}"),
                    "AdPlacement::from_str",
                )
            })
    }
}

/// The ad unit family a request runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdFormat {
    Banner,
    Interstitial,
    Rewarded,
}

impl AdFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdFormat::Banner => "banner",
            AdFormat::Interstitial => "interstitial",
            AdFormat::Rewarded => "rewarded",
        }
    }
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
