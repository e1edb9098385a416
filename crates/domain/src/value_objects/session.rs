//! Session context - one per page load.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Immutable facts about the running session, created once at process
/// start. The only exception is `locale`, which some platforms report
/// asynchronously during bootstrap; it is write-once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub platform: Platform,
    pub game_id: String,
    pub session_id: String,
    pub country: String,
    pub browser_user_agent: String,
    /// Milliseconds-since-epoch at session start; the ad state machine uses
    /// this for the preroll load-time window.
    pub started_at_millis: u64,
    locale: Option<String>,
}

impl SessionContext {
    pub fn new(
        platform: Platform,
        game_id: impl Into<String>,
        session_id: impl Into<String>,
        country: impl Into<String>,
        browser_user_agent: impl Into<String>,
        started_at_millis: u64,
    ) -> Self {
        Self {
            platform,
            game_id: game_id.into(),
            session_id: session_id.into(),
            country: country.into(),
            browser_user_agent: browser_user_agent.into(),
            started_at_millis,
            locale: None,
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Record the locale reported by the platform. Write-once: later calls
    /// are ignored.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        if self.locale.is_none() {
            self.locale = Some(locale.into());
        }
    }
}
