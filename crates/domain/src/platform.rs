//! The closed set of hosting platforms.
//!
//! A `Platform` is resolved exactly once per session (see [`crate::resolver`])
//! and every other component reads it. The wire name of each variant is the
//! lowercase identifier used in launch URLs and analytics payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorCode, SdkError};

/// A hosting platform the game can be embedded on.
///
/// Each platform provides its own foreign SDK, loading mechanism, and
/// callback conventions; the SDK selects one adapter per resolved platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// The first-party game portal (AdSense-backed ads).
    Wortal,
    /// Rakuten Games "Link" platform.
    Link,
    /// Viber games.
    Viber,
    /// Facebook Instant Games.
    Facebook,
    /// GameDistribution.
    Gd,
    /// CrazyGames.
    CrazyGames,
    /// GamePix.
    GamePix,
    /// Poki.
    Poki,
    /// Telegram games (iframed wrapper around the portal).
    Telegram,
    /// GameMonetize.
    GameMonetize,
    /// AddictingGames.
    AddictingGames,
    /// Yandex Games.
    Yandex,
    /// Local development stub - no foreign SDK, every capability succeeds.
    Debug,
}

impl Platform {
    /// All platforms, in a stable order.
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Wortal,
            Platform::Link,
            Platform::Viber,
            Platform::Facebook,
            Platform::Gd,
            Platform::CrazyGames,
            Platform::GamePix,
            Platform::Poki,
            Platform::Telegram,
            Platform::GameMonetize,
            Platform::AddictingGames,
            Platform::Yandex,
            Platform::Debug,
        ]
    }

    /// The lowercase wire name used in URLs and analytics payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Wortal => "wortal",
            Platform::Link => "link",
            Platform::Viber => "viber",
            Platform::Facebook => "facebook",
            Platform::Gd => "gd",
            Platform::CrazyGames => "crazygames",
            Platform::GamePix => "gamepix",
            Platform::Poki => "poki",
            Platform::Telegram => "telegram",
            Platform::GameMonetize => "gamemonetize",
            Platform::AddictingGames => "addictinggames",
            Platform::Yandex => "yandex",
            Platform::Debug => "debug",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::all()
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| {
                SdkError::new(
                    ErrorCode::InvalidParam,
                    format!("unknown platform: {s}"),
                    "Platform::from_str",
                )
            })
    }
}
