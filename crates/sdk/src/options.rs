//! Launch configuration.
//!
//! Everything the SDK is configured with arrives through the launch URL
//! and two attributes on the hosting `<script>` tag; there is no config
//! file. [`SdkOptions::from_launch`] parses both into one value consumed
//! exactly once by [`crate::Sdk::launch`].

use std::collections::HashMap;
use std::time::Duration;

use hostbridge_domain::{resolve, AdsenseSettings, Platform, SdkError};
use url::Url;

/// Default bound on every "wait for readiness" poll.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Attributes read off the hosting `<script>` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptAttributes {
    /// `data-manual-init`: the game drives `initializeAsync` /
    /// `startGameAsync` itself instead of the SDK bootstrapping unattended.
    pub manual_init: bool,
    /// `data-debug-mode`: force the debug platform regardless of domain.
    pub debug_mode: bool,
}

/// Parsed launch configuration.
#[derive(Debug, Clone)]
pub struct SdkOptions {
    /// Host domain the game is served from.
    pub host: String,
    /// Query parameters of the launch URL.
    pub query: HashMap<String, String>,
    pub manual_init: bool,
    pub debug_mode: bool,
    /// Game identifier, taken from the last path segment of the launch URL.
    pub game_id: String,
    /// Session identifier: the host's `sessid` parameter, or generated.
    pub session_id: String,
    pub country: String,
    pub browser_user_agent: String,
    /// AdSense settings for the portal platform.
    pub adsense: AdsenseSettings,
    /// Bound on readiness waits (see `state::init`).
    pub ready_timeout: Duration,
}

impl SdkOptions {
    /// Parse the launch URL and script attributes.
    pub fn from_launch(
        launch_url: &str,
        attrs: ScriptAttributes,
        user_agent: &str,
    ) -> Result<Self, SdkError> {
        let parsed = Url::parse(launch_url)
            .map_err(|e| SdkError::invalid_param(format!("launch URL: {e}"), "initializeAsync"))?;

        let query: HashMap<String, String> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let debug_mode = attrs.debug_mode || flag_set(&query, "debug");

        let session_id = query
            .get("sessid")
            .cloned()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let frequency_cap_secs = match query.get("freqcap").map(|v| v.parse::<u32>()) {
            Some(Ok(secs)) => Some(secs),
            Some(Err(_)) => {
                tracing::warn!(value = %query["freqcap"], "ignoring unparseable freqcap");
                None
            }
            None => None,
        };

        let adsense = AdsenseSettings {
            client_id: query.get("clientid").cloned(),
            host_id: query.get("hostid").cloned(),
            channel_id: query.get("channelid").cloned(),
            frequency_cap_secs,
        };

        let game_id = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            host: parsed.host_str().unwrap_or_default().to_string(),
            query,
            manual_init: attrs.manual_init,
            debug_mode,
            game_id,
            session_id,
            country: "unknown".to_string(),
            browser_user_agent: user_agent.to_string(),
            adsense,
            ready_timeout: DEFAULT_READY_TIMEOUT,
        })
    }

    /// Options for the debug platform - handy in tests and demos.
    pub fn debug(game_id: impl Into<String>) -> Self {
        Self {
            host: "localhost".to_string(),
            query: HashMap::new(),
            manual_init: false,
            debug_mode: true,
            game_id: game_id.into(),
            session_id: uuid::Uuid::new_v4().to_string(),
            country: "unknown".to_string(),
            browser_user_agent: "hostbridge-test".to_string(),
            adsense: AdsenseSettings::default(),
            ready_timeout: DEFAULT_READY_TIMEOUT,
        }
    }

    pub fn with_manual_init(mut self, manual: bool) -> Self {
        self.manual_init = manual;
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    /// Resolve the hosting platform. Debug mode wins over the domain.
    pub fn resolve_platform(&self) -> Platform {
        if self.debug_mode {
            Platform::Debug
        } else {
            resolve(&self.host, &self.query)
        }
    }
}

fn flag_set(query: &HashMap<String, String>, key: &str) -> bool {
    matches!(
        query.get(key).map(String::as_str),
        Some("1") | Some("true") | Some("yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_adsense_and_session_params() {
        let options = SdkOptions::from_launch(
            "https://html5gameportal.com/games/skyblocks?clientid=ca-pub-1&hostid=h-2&channelid=77&freqcap=30&sessid=s-123",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("parses");

        assert_eq!(options.host, "html5gameportal.com");
        assert_eq!(options.game_id, "skyblocks");
        assert_eq!(options.session_id, "s-123");
        assert_eq!(options.adsense.client_id.as_deref(), Some("ca-pub-1"));
        assert_eq!(options.adsense.frequency_cap_secs, Some(30));
        assert_eq!(options.resolve_platform(), Platform::Wortal);
    }

    #[test]
    fn test_generates_session_id_when_absent() {
        let options = SdkOptions::from_launch(
            "https://html5gameportal.com/games/skyblocks",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("parses");
        assert!(!options.session_id.is_empty());
    }

    #[test]
    fn test_debug_flag_forces_debug_platform() {
        let options = SdkOptions::from_launch(
            "https://html5gameportal.com/games/skyblocks?debug=true",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("parses");
        assert_eq!(options.resolve_platform(), Platform::Debug);
    }

    #[test]
    fn test_unparseable_freqcap_is_dropped() {
        let options = SdkOptions::from_launch(
            "https://html5gameportal.com/games/skyblocks?freqcap=soon",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("parses");
        assert_eq!(options.adsense.frequency_cap_secs, None);
    }

    #[test]
    fn test_rejects_garbage_url() {
        let err = SdkOptions::from_launch("not a url", ScriptAttributes::default(), "agent")
            .expect_err("must not parse");
        assert_eq!(err.code, hostbridge_domain::ErrorCode::InvalidParam);
    }
}
