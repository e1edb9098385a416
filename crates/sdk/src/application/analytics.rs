//! Analytics capability.
//!
//! Typed event constructors over the analytics transport. Emission is
//! fire-and-forget: events are enveloped with the session context and
//! handed to a spawned task, so logging never blocks gameplay. Delivery
//! failures are logged and dropped.

use std::sync::{Arc, RwLock};

use hostbridge_domain::{AdFormat, AdPlacement, AnalyticsEvent, SdkError, SessionContext};
use serde_json::json;

use crate::ports::outbound::AnalyticsTransport;

use super::validation::ValidationError;
use super::read_lock;

pub const API_LOG_LEVEL_START: &str = "analytics.logLevelStart";
pub const API_LOG_LEVEL_END: &str = "analytics.logLevelEnd";
pub const API_LOG_GAME_CHOICE: &str = "analytics.logGameChoice";

pub struct AnalyticsCapability {
    transport: Arc<dyn AnalyticsTransport>,
    session: Arc<RwLock<SessionContext>>,
}

impl AnalyticsCapability {
    pub fn new(transport: Arc<dyn AnalyticsTransport>, session: Arc<RwLock<SessionContext>>) -> Self {
        Self { transport, session }
    }

    /// Envelope an event with the session facts every payload carries.
    fn envelope(&self, event: &AnalyticsEvent) -> serde_json::Value {
        let session = read_lock(&self.session);
        json!({
            "name": event.name(),
            "game_id": session.game_id,
            "platform": session.platform,
            "session_id": session.session_id,
            "country": session.country,
            "data": event,
        })
    }

    /// Hand the event to the transport without blocking the caller.
    fn emit(&self, event: AnalyticsEvent) {
        let payload = self.envelope(&event);
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            if let Err(e) = transport.send(payload).await {
                tracing::warn!(error = %e, "analytics delivery failed");
            }
        });
    }

    pub fn log_game_start(&self) {
        self.emit(AnalyticsEvent::GameStart);
    }

    pub fn log_game_end(&self) {
        self.emit(AnalyticsEvent::GameEnd);
    }

    pub fn log_level_start(&self, level: &str) -> Result<(), SdkError> {
        if level.trim().is_empty() {
            return Err(ValidationError::invalid("level may not be empty")
                .into_error(API_LOG_LEVEL_START));
        }
        self.emit(AnalyticsEvent::LevelStart {
            level: level.to_string(),
        });
        Ok(())
    }

    pub fn log_level_end(
        &self,
        level: &str,
        score: &str,
        was_completed: bool,
    ) -> Result<(), SdkError> {
        if level.trim().is_empty() {
            return Err(
                ValidationError::invalid("level may not be empty").into_error(API_LOG_LEVEL_END)
            );
        }
        self.emit(AnalyticsEvent::LevelEnd {
            level: level.to_string(),
            score: score.to_string(),
            was_completed,
        });
        Ok(())
    }

    pub fn log_game_choice(&self, decision: &str, choice: &str) -> Result<(), SdkError> {
        if decision.trim().is_empty() || choice.trim().is_empty() {
            return Err(ValidationError::invalid("decision and choice may not be empty")
                .into_error(API_LOG_GAME_CHOICE));
        }
        self.emit(AnalyticsEvent::GameChoice {
            decision: decision.to_string(),
            choice: choice.to_string(),
        });
        Ok(())
    }

    /// Internal: the single terminal event per ad request.
    pub(crate) fn log_ad_call(
        &self,
        format: AdFormat,
        placement: AdPlacement,
        success: bool,
        viewed_reward: Option<bool>,
    ) {
        self.emit(AnalyticsEvent::AdCall {
            format,
            placement,
            success,
            viewed_reward,
        });
    }
}
