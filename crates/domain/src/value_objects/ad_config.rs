//! Ad configuration state.
//!
//! Owned exclusively by the Ads capability. Adapters never mutate this
//! directly - all writes go through the setters below, which is what keeps
//! the counters and the preroll/ad-block flags trustworthy for analytics.
//! There is no reset: one game session per page load.

use serde::{Deserialize, Serialize};

/// AdSense-specific settings carried in the launch URL on the portal
/// platform (`clientid`, `hostid`, `channelid`, `freqcap`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdsenseSettings {
    pub client_id: Option<String>,
    pub host_id: Option<String>,
    pub channel_id: Option<String>,
    /// Minimum seconds between interstitials, when the host enforces one.
    pub frequency_cap_secs: Option<u32>,
}

/// Mutable ad state for the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdConfig {
    is_ad_blocked: bool,
    has_preroll_shown: bool,
    interstitial_unit_id: Option<String>,
    rewarded_unit_id: Option<String>,
    banner_unit_id: Option<String>,
    ads_called: u32,
    ads_shown: u32,
    adsense: AdsenseSettings,
}

impl AdConfig {
    pub fn new(adsense: AdsenseSettings) -> Self {
        Self {
            adsense,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn is_ad_blocked(&self) -> bool {
        self.is_ad_blocked
    }

    pub fn has_preroll_shown(&self) -> bool {
        self.has_preroll_shown
    }

    pub fn interstitial_unit_id(&self) -> Option<&str> {
        self.interstitial_unit_id.as_deref()
    }

    pub fn rewarded_unit_id(&self) -> Option<&str> {
        self.rewarded_unit_id.as_deref()
    }

    pub fn banner_unit_id(&self) -> Option<&str> {
        self.banner_unit_id.as_deref()
    }

    pub fn ads_called(&self) -> u32 {
        self.ads_called
    }

    pub fn ads_shown(&self) -> u32 {
        self.ads_shown
    }

    pub fn adsense(&self) -> &AdsenseSettings {
        &self.adsense
    }

    // ------------------------------------------------------------------
    // Writes - Ads capability only
    // ------------------------------------------------------------------

    /// Record that an ad blocker was detected. Never unset within a session.
    pub fn set_ad_blocked(&mut self, blocked: bool) {
        self.is_ad_blocked = self.is_ad_blocked || blocked;
    }

    /// Record that the preroll placement was consumed.
    pub fn set_preroll_shown(&mut self) {
        self.has_preroll_shown = true;
    }

    /// Count a terminal ad request.
    pub fn ad_called(&mut self) {
        self.ads_called = self.ads_called.saturating_add(1);
    }

    /// Count an ad that was actually displayed.
    pub fn ad_shown(&mut self) {
        self.ads_shown = self.ads_shown.saturating_add(1);
    }

    /// Store the ad unit ids fetched during bootstrap.
    pub fn set_ad_units(
        &mut self,
        interstitial: Option<String>,
        rewarded: Option<String>,
        banner: Option<String>,
    ) {
        self.interstitial_unit_id = interstitial;
        self.rewarded_unit_id = rewarded;
        self.banner_unit_id = banner;
    }
}
