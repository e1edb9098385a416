//! Ads capability - validation, dispatch, and the per-request state
//! machine.
//!
//! Every ad request runs `Requested -> Validated -> (short-circuit |
//! Dispatched) -> terminal`. Validation failures return a typed error and
//! never reach the adapter. A detected ad blocker short-circuits straight
//! to the game's `no_fill` callback, because several foreign SDKs never
//! resolve when a blocker eats their inventory request. Dispatched
//! requests retry no-fill up to a fixed bound (never for preroll), and a
//! terminal state bumps the counters and emits exactly one analytics
//! event.
//!
//! Malformed-but-recoverable input is tolerated: a missing `before_ad` or
//! `after_ad` callback becomes a warning no-op so a sloppy call cannot
//! hang the game. The one exception is `ad_viewed` on rewarded ads, which
//! is required - silently proceeding would risk granting unearned rewards.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use hostbridge_domain::{AdConfig, AdFormat, AdPlacement, SdkError, SessionContext};

use crate::ports::outbound::{AdOutcome, TimeProvider};
use crate::state::BootObserver;

use super::analytics::AnalyticsCapability;
use super::dispatch::AdapterSlot;
use super::validation::{Validation, ValidationError};
use super::{read_lock, write_lock};

pub const API_SHOW_INTERSTITIAL: &str = "ads.showInterstitial";
pub const API_SHOW_REWARDED: &str = "ads.showRewarded";
pub const API_SHOW_BANNER: &str = "ads.showBanner";

/// Total adapter attempts per request when the network reports no fill.
const MAX_AD_ATTEMPTS: u32 = 3;

/// Preroll is load-time only: past this point into the session it is
/// rejected outright.
const PREROLL_WINDOW: Duration = Duration::from_secs(10);

/// A game-supplied ad lifecycle callback.
pub type AdCallback = Box<dyn FnMut() + Send + 'static>;

/// The uniform five-member callback contract for one ad request.
#[derive(Default)]
pub struct AdCallbacks {
    before_ad: Option<AdCallback>,
    after_ad: Option<AdCallback>,
    no_fill: Option<AdCallback>,
    ad_dismissed: Option<AdCallback>,
    ad_viewed: Option<AdCallback>,
}

impl AdCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired just before the ad is requested - pause the game here.
    pub fn on_before_ad(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.before_ad = Some(Box::new(f));
        self
    }

    /// Fired when the ad closes - resume the game here.
    pub fn on_after_ad(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.after_ad = Some(Box::new(f));
        self
    }

    /// Fired when no ad could be shown.
    pub fn on_no_fill(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.no_fill = Some(Box::new(f));
        self
    }

    /// Rewarded only: the player closed the ad before the reward.
    pub fn on_ad_dismissed(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.ad_dismissed = Some(Box::new(f));
        self
    }

    /// Rewarded only: the player earned the reward. Required.
    pub fn on_ad_viewed(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.ad_viewed = Some(Box::new(f));
        self
    }

    fn has_ad_viewed(&self) -> bool {
        self.ad_viewed.is_some()
    }

    /// Substitute warning no-ops for the optional members so a malformed
    /// call can never hang the game waiting on a callback.
    fn normalize(self, api: &'static str) -> ActiveCallbacks {
        ActiveCallbacks {
            before_ad: self.before_ad.unwrap_or_else(|| warn_stub(api, "beforeAd")),
            after_ad: self.after_ad.unwrap_or_else(|| warn_stub(api, "afterAd")),
            no_fill: self.no_fill.unwrap_or_else(|| warn_stub(api, "noFill")),
            ad_dismissed: self.ad_dismissed,
            ad_viewed: self.ad_viewed,
        }
    }
}

/// Callbacks after normalization - the required three are always present.
struct ActiveCallbacks {
    before_ad: AdCallback,
    after_ad: AdCallback,
    no_fill: AdCallback,
    ad_dismissed: Option<AdCallback>,
    ad_viewed: Option<AdCallback>,
}

fn warn_stub(api: &'static str, name: &'static str) -> AdCallback {
    Box::new(move || {
        tracing::warn!(api, callback = name, "callback missing; substituted a no-op");
    })
}

/// One validated ad request, consumed by exactly one adapter dispatch
/// (plus its internal retries).
struct AdRequest {
    placement: AdPlacement,
    ad_unit_id: Option<String>,
    description: String,
}

pub struct AdsCapability {
    slot: Arc<AdapterSlot>,
    analytics: Arc<AnalyticsCapability>,
    config: RwLock<AdConfig>,
    boot: BootObserver,
    time: Arc<dyn TimeProvider>,
    session: Arc<RwLock<SessionContext>>,
    ready_timeout: Duration,
}

impl AdsCapability {
    pub fn new(
        slot: Arc<AdapterSlot>,
        analytics: Arc<AnalyticsCapability>,
        config: AdConfig,
        boot: BootObserver,
        time: Arc<dyn TimeProvider>,
        session: Arc<RwLock<SessionContext>>,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            slot,
            analytics,
            config: RwLock::new(config),
            boot,
            time,
            session,
            ready_timeout,
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn is_ad_blocked(&self) -> bool {
        read_lock(&self.config).is_ad_blocked()
    }

    pub fn has_preroll_shown(&self) -> bool {
        read_lock(&self.config).has_preroll_shown()
    }

    pub fn ads_called(&self) -> u32 {
        read_lock(&self.config).ads_called()
    }

    pub fn ads_shown(&self) -> u32 {
        read_lock(&self.config).ads_shown()
    }

    /// Snapshot of the full ad configuration.
    pub fn config(&self) -> AdConfig {
        read_lock(&self.config).clone()
    }

    // ------------------------------------------------------------------
    // Bootstrap hooks (orchestrator only)
    // ------------------------------------------------------------------

    pub(crate) fn set_ad_blocked(&self, blocked: bool) {
        write_lock(&self.config).set_ad_blocked(blocked);
    }

    pub(crate) async fn load_ad_units(&self) -> Result<(), SdkError> {
        let units = self.slot.get().fetch_ad_units().await?;
        write_lock(&self.config).set_ad_units(units.interstitial, units.rewarded, units.banner);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Public surface
    // ------------------------------------------------------------------

    /// Show an interstitial ad at the given placement.
    ///
    /// Resolves once the request reaches a terminal state; the game flow
    /// is driven by the callbacks. A failed or unfilled ad never blocks
    /// gameplay - some callback always releases the game.
    pub async fn show_interstitial(
        &self,
        placement: AdPlacement,
        description: &str,
        callbacks: AdCallbacks,
    ) -> Result<(), SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_SHOW_INTERSTITIAL)
            .await?;
        self.validate_interstitial(placement)
            .map_err(|e| e.into_error(API_SHOW_INTERSTITIAL))?;

        if placement == AdPlacement::Preroll {
            // Consume the placement as soon as it is dispatched, so a
            // second preroll is rejected even while this one runs.
            write_lock(&self.config).set_preroll_shown();
        }

        let mut callbacks = callbacks.normalize(API_SHOW_INTERSTITIAL);

        if self.is_ad_blocked() {
            tracing::info!(%placement, "ad blocker active; short-circuiting to no-fill");
            (callbacks.no_fill)();
            self.finish(AdFormat::Interstitial, placement, false, false, None);
            return Ok(());
        }

        let request = AdRequest {
            placement,
            ad_unit_id: read_lock(&self.config)
                .interstitial_unit_id()
                .map(str::to_string),
            description: description.to_string(),
        };

        (callbacks.before_ad)();
        let outcome = self.dispatch_interstitial(&request).await;

        match outcome {
            // Interstitials have no reward to forfeit, so a dismissal is
            // just a shown ad the player closed.
            AdOutcome::Shown | AdOutcome::Dismissed => {
                (callbacks.after_ad)();
                self.finish(AdFormat::Interstitial, placement, true, true, None);
            }
            AdOutcome::NoFill => {
                (callbacks.no_fill)();
                self.finish(AdFormat::Interstitial, placement, false, false, None);
            }
            AdOutcome::Error(code) => {
                tracing::warn!(%placement, %code, "interstitial failed; releasing the game");
                (callbacks.no_fill)();
                (callbacks.after_ad)();
                self.finish(AdFormat::Interstitial, placement, false, false, None);
            }
        }
        Ok(())
    }

    /// Show a rewarded ad.
    ///
    /// The `ad_viewed` callback is mandatory: without it the game could
    /// not tell an earned reward from a dismissal.
    pub async fn show_rewarded(
        &self,
        description: &str,
        callbacks: AdCallbacks,
    ) -> Result<(), SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_SHOW_REWARDED)
            .await?;
        if !callbacks.has_ad_viewed() {
            return Err(
                ValidationError::invalid("adViewed callback is required for rewarded ads")
                    .into_error(API_SHOW_REWARDED),
            );
        }

        let mut callbacks = callbacks.normalize(API_SHOW_REWARDED);

        if self.is_ad_blocked() {
            tracing::info!("ad blocker active; short-circuiting rewarded request");
            (callbacks.no_fill)();
            if let Some(dismissed) = callbacks.ad_dismissed.as_mut() {
                dismissed();
            }
            self.finish(AdFormat::Rewarded, AdPlacement::Reward, false, false, Some(false));
            return Ok(());
        }

        let request = AdRequest {
            placement: AdPlacement::Reward,
            ad_unit_id: read_lock(&self.config)
                .rewarded_unit_id()
                .map(str::to_string),
            description: description.to_string(),
        };

        (callbacks.before_ad)();
        let outcome = self.dispatch_rewarded(&request).await;

        match outcome {
            AdOutcome::Shown => {
                if let Some(viewed) = callbacks.ad_viewed.as_mut() {
                    viewed();
                }
                (callbacks.after_ad)();
                self.finish(AdFormat::Rewarded, AdPlacement::Reward, true, true, Some(true));
            }
            AdOutcome::Dismissed => {
                if let Some(dismissed) = callbacks.ad_dismissed.as_mut() {
                    dismissed();
                }
                (callbacks.after_ad)();
                self.finish(AdFormat::Rewarded, AdPlacement::Reward, true, true, Some(false));
            }
            AdOutcome::NoFill => {
                (callbacks.no_fill)();
                self.finish(AdFormat::Rewarded, AdPlacement::Reward, false, false, Some(false));
            }
            AdOutcome::Error(code) => {
                tracing::warn!(%code, "rewarded ad failed; releasing the game");
                (callbacks.no_fill)();
                (callbacks.after_ad)();
                self.finish(AdFormat::Rewarded, AdPlacement::Reward, false, false, Some(false));
            }
        }
        Ok(())
    }

    /// Show or hide the banner.
    pub async fn show_banner(&self, visible: bool) -> Result<(), SdkError> {
        self.boot
            .wait_platform_ready(self.ready_timeout, API_SHOW_BANNER)
            .await?;
        if self.is_ad_blocked() {
            tracing::debug!("ad blocker active; banner request dropped");
            return Ok(());
        }
        let unit = read_lock(&self.config).banner_unit_id().map(str::to_string);
        self.slot
            .get()
            .show_banner_impl(unit.as_deref(), visible)
            .await
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn validate_interstitial(&self, placement: AdPlacement) -> Validation {
        if placement == AdPlacement::Reward {
            return Err(ValidationError::invalid(
                "reward placement must go through showRewarded",
            ));
        }
        if placement == AdPlacement::Preroll {
            let adapter = self.slot.get();
            if !adapter.supports_preroll() {
                return Err(ValidationError::invalid(format!(
                    "preroll is not supported on {}",
                    adapter.platform()
                )));
            }
            if read_lock(&self.config).has_preroll_shown() {
                return Err(ValidationError::invalid(
                    "preroll has already been shown this session",
                ));
            }
            let started = read_lock(&self.session).started_at_millis;
            let elapsed = self.time.now_millis().saturating_sub(started);
            if elapsed > PREROLL_WINDOW.as_millis() as u64 {
                return Err(ValidationError::invalid(
                    "preroll is only available while the game is loading",
                ));
            }
        }
        Ok(())
    }

    async fn dispatch_interstitial(&self, request: &AdRequest) -> AdOutcome {
        let adapter = self.slot.get();
        // Preroll gates game visibility: it must resolve fast or be
        // skipped, so it never retries.
        let max_attempts = if request.placement == AdPlacement::Preroll {
            1
        } else {
            MAX_AD_ATTEMPTS
        };
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = adapter
                .show_interstitial_impl(
                    request.placement,
                    request.ad_unit_id.as_deref(),
                    &request.description,
                )
                .await;
            match outcome {
                AdOutcome::NoFill if attempt < max_attempts => {
                    tracing::debug!(attempt, placement = %request.placement, "no fill; retrying");
                }
                outcome => return outcome,
            }
        }
    }

    async fn dispatch_rewarded(&self, request: &AdRequest) -> AdOutcome {
        let adapter = self.slot.get();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = adapter
                .show_rewarded_impl(request.ad_unit_id.as_deref(), &request.description)
                .await;
            match outcome {
                AdOutcome::NoFill if attempt < MAX_AD_ATTEMPTS => {
                    tracing::debug!(attempt, "rewarded no fill; retrying");
                }
                outcome => return outcome,
            }
        }
    }

    /// Terminal bookkeeping: counters plus the single analytics event.
    fn finish(
        &self,
        format: AdFormat,
        placement: AdPlacement,
        success: bool,
        shown: bool,
        viewed_reward: Option<bool>,
    ) {
        {
            let mut config = write_lock(&self.config);
            config.ad_called();
            if shown {
                config.ad_shown();
            }
        }
        self.analytics
            .log_ad_call(format, placement, success, viewed_reward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{ManualClock, RecordingAnalytics, ScriptedAdapter};
    use crate::state::BootSignal;
    use hostbridge_domain::{ErrorCode, Platform};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Fixture {
        ads: AdsCapability,
        adapter: Arc<ScriptedAdapter>,
        analytics: RecordingAnalytics,
        clock: Arc<ManualClock>,
    }

    fn fixture(adapter: ScriptedAdapter) -> Fixture {
        let adapter = Arc::new(adapter);
        let recording = RecordingAnalytics::new();
        let clock = Arc::new(ManualClock::at_millis(1_000));
        let session = Arc::new(RwLock::new(SessionContext::new(
            Platform::Debug,
            "game-1",
            "sess-1",
            "US",
            "agent",
            1_000,
        )));
        let analytics = Arc::new(AnalyticsCapability::new(
            Arc::new(recording.clone()),
            Arc::clone(&session),
        ));
        let signal = BootSignal::new(true);
        signal.mark_platform_initialized();
        let slot: Arc<AdapterSlot> = Arc::new(AdapterSlot::new(
            Arc::clone(&adapter) as Arc<dyn crate::ports::outbound::PlatformAdapter>
        ));
        let ads = AdsCapability::new(
            slot,
            analytics,
            AdConfig::default(),
            signal.observer(),
            Arc::clone(&clock) as Arc<dyn TimeProvider>,
            session,
            Duration::from_secs(5),
        );
        Fixture {
            ads,
            adapter,
            analytics: recording,
            clock,
        }
    }

    fn counting(count: &Arc<AtomicU32>) -> impl FnMut() + Send + 'static {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn settle() {
        // Let the spawned analytics task drain.
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_reward_placement_is_rejected_for_interstitial() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug));
        let err = f
            .ads
            .show_interstitial(AdPlacement::Reward, "wrong door", AdCallbacks::new())
            .await
            .expect_err("reward placement is a rewarded-only concept");

        assert_eq!(err.code, ErrorCode::InvalidParam);
        assert_eq!(f.adapter.foreign_ad_calls(), 0);
        settle().await;
        assert!(f.analytics.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_callbacks_are_not_fatal() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug));
        f.ads
            .show_interstitial(AdPlacement::Next, "level 2", AdCallbacks::new())
            .await
            .expect("missing before/after callbacks are stubbed");

        assert_eq!(f.adapter.foreign_ad_calls(), 1);
        assert_eq!(f.ads.ads_shown(), 1);
    }

    #[tokio::test]
    async fn test_interstitial_success_flow() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug));
        let before = Arc::new(AtomicU32::new(0));
        let after = Arc::new(AtomicU32::new(0));

        f.ads
            .show_interstitial(
                AdPlacement::Next,
                "Level2",
                AdCallbacks::new()
                    .on_before_ad(counting(&before))
                    .on_after_ad(counting(&after)),
            )
            .await
            .expect("success flow");

        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 1);
        assert_eq!(f.ads.ads_called(), 1);
        assert_eq!(f.ads.ads_shown(), 1);

        settle().await;
        let sent = f.analytics.sent_named("AdCall");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["data"]["success"], true);
    }

    #[tokio::test]
    async fn test_rewarded_requires_ad_viewed_callback() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug));
        let err = f
            .ads
            .show_rewarded("bonus", AdCallbacks::new())
            .await
            .expect_err("rewards must be observable");

        assert_eq!(err.code, ErrorCode::InvalidParam);
        assert_eq!(f.adapter.foreign_ad_calls(), 0);
    }

    #[tokio::test]
    async fn test_preroll_cannot_show_twice() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug));
        f.ads
            .show_interstitial(AdPlacement::Preroll, "intro", AdCallbacks::new())
            .await
            .expect("first preroll is fine");
        assert!(f.ads.has_preroll_shown());

        let err = f
            .ads
            .show_interstitial(AdPlacement::Preroll, "intro again", AdCallbacks::new())
            .await
            .expect_err("preroll is once per session");
        assert_eq!(err.code, ErrorCode::InvalidParam);
        assert_eq!(f.adapter.foreign_ad_calls(), 1);
    }

    #[tokio::test]
    async fn test_preroll_rejected_after_load_window() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug));
        f.clock.advance(Duration::from_secs(11));

        let err = f
            .ads
            .show_interstitial(AdPlacement::Preroll, "late", AdCallbacks::new())
            .await
            .expect_err("preroll is load-time only");
        assert_eq!(err.code, ErrorCode::InvalidParam);
        assert_eq!(f.adapter.foreign_ad_calls(), 0);
    }

    #[tokio::test]
    async fn test_preroll_rejected_without_platform_support() {
        let f = fixture(ScriptedAdapter::new(Platform::Poki).without_preroll());
        let err = f
            .ads
            .show_interstitial(AdPlacement::Preroll, "intro", AdCallbacks::new())
            .await
            .expect_err("platform has no preroll");
        assert_eq!(err.code, ErrorCode::InvalidParam);
    }

    #[tokio::test]
    async fn test_ad_block_short_circuits_interstitial() {
        let f = fixture(ScriptedAdapter::new(Platform::Wortal));
        f.ads.set_ad_blocked(true);
        let no_fill = Arc::new(AtomicU32::new(0));

        f.ads
            .show_interstitial(
                AdPlacement::Pause,
                "paused",
                AdCallbacks::new().on_no_fill(counting(&no_fill)),
            )
            .await
            .expect("short-circuit is not an error");

        assert_eq!(no_fill.load(Ordering::SeqCst), 1);
        assert_eq!(f.adapter.foreign_ad_calls(), 0);
        assert_eq!(f.ads.ads_called(), 1);
        assert_eq!(f.ads.ads_shown(), 0);

        settle().await;
        let sent = f.analytics.sent_named("AdCall");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["data"]["success"], false);
    }

    #[tokio::test]
    async fn test_ad_block_short_circuits_rewarded_with_dismissal() {
        let f = fixture(ScriptedAdapter::new(Platform::Wortal));
        f.ads.set_ad_blocked(true);
        let no_fill = Arc::new(AtomicU32::new(0));
        let dismissed = Arc::new(AtomicU32::new(0));
        let viewed = Arc::new(AtomicU32::new(0));

        f.ads
            .show_rewarded(
                "bonus",
                AdCallbacks::new()
                    .on_no_fill(counting(&no_fill))
                    .on_ad_dismissed(counting(&dismissed))
                    .on_ad_viewed(counting(&viewed)),
            )
            .await
            .expect("short-circuit is not an error");

        assert_eq!(no_fill.load(Ordering::SeqCst), 1);
        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
        assert_eq!(viewed.load(Ordering::SeqCst), 0);
        assert_eq!(f.adapter.foreign_ad_calls(), 0);
    }

    #[tokio::test]
    async fn test_no_fill_retries_are_bounded() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug).with_outcomes([
            AdOutcome::NoFill,
            AdOutcome::NoFill,
            AdOutcome::NoFill,
            // A fourth attempt would consume this and the test would fail.
            AdOutcome::Shown,
        ]));
        let no_fill = Arc::new(AtomicU32::new(0));

        f.ads
            .show_interstitial(
                AdPlacement::Next,
                "level 3",
                AdCallbacks::new().on_no_fill(counting(&no_fill)),
            )
            .await
            .expect("exhausted retries are not an error");

        assert_eq!(f.adapter.foreign_ad_calls(), 3);
        assert_eq!(no_fill.load(Ordering::SeqCst), 1);
        assert_eq!(f.ads.ads_shown(), 0);

        settle().await;
        assert_eq!(f.analytics.sent_named("AdCall").len(), 1);
    }

    #[tokio::test]
    async fn test_late_fill_within_retry_budget_succeeds() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug).with_outcomes([
            AdOutcome::NoFill,
            AdOutcome::NoFill,
            AdOutcome::Shown,
        ]));
        let after = Arc::new(AtomicU32::new(0));

        f.ads
            .show_interstitial(
                AdPlacement::Next,
                "level 3",
                AdCallbacks::new().on_after_ad(counting(&after)),
            )
            .await
            .expect("third attempt fills");

        assert_eq!(f.adapter.foreign_ad_calls(), 3);
        assert_eq!(after.load(Ordering::SeqCst), 1);
        assert_eq!(f.ads.ads_shown(), 1);
    }

    #[tokio::test]
    async fn test_preroll_never_retries() {
        let f = fixture(
            ScriptedAdapter::new(Platform::Debug)
                .with_outcomes([AdOutcome::NoFill, AdOutcome::Shown]),
        );
        let no_fill = Arc::new(AtomicU32::new(0));

        f.ads
            .show_interstitial(
                AdPlacement::Preroll,
                "intro",
                AdCallbacks::new().on_no_fill(counting(&no_fill)),
            )
            .await
            .expect("unfilled preroll is skipped, not retried");

        assert_eq!(f.adapter.foreign_ad_calls(), 1);
        assert_eq!(no_fill.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_outcome_still_releases_the_game() {
        let f = fixture(
            ScriptedAdapter::new(Platform::Debug)
                .with_outcomes([AdOutcome::Error(ErrorCode::OperationFailed)]),
        );
        let no_fill = Arc::new(AtomicU32::new(0));
        let after = Arc::new(AtomicU32::new(0));

        f.ads
            .show_interstitial(
                AdPlacement::Next,
                "level 4",
                AdCallbacks::new()
                    .on_no_fill(counting(&no_fill))
                    .on_after_ad(counting(&after)),
            )
            .await
            .expect("adapter errors surface through callbacks");

        assert_eq!(no_fill.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 1);
        // Errors are terminal immediately - no retry.
        assert_eq!(f.adapter.foreign_ad_calls(), 1);
    }

    #[tokio::test]
    async fn test_rewarded_dismissal_forfeits_reward() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug).with_outcomes([AdOutcome::Dismissed]));
        let dismissed = Arc::new(AtomicU32::new(0));
        let viewed = Arc::new(AtomicU32::new(0));
        let after = Arc::new(AtomicU32::new(0));

        f.ads
            .show_rewarded(
                "bonus",
                AdCallbacks::new()
                    .on_ad_dismissed(counting(&dismissed))
                    .on_ad_viewed(counting(&viewed))
                    .on_after_ad(counting(&after)),
            )
            .await
            .expect("dismissal is a valid terminal state");

        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
        assert_eq!(viewed.load(Ordering::SeqCst), 0);
        assert_eq!(after.load(Ordering::SeqCst), 1);

        settle().await;
        let sent = f.analytics.sent_named("AdCall");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["data"]["viewed_reward"], false);
    }

    #[tokio::test]
    async fn test_rewarded_completion_grants_reward() {
        let f = fixture(ScriptedAdapter::new(Platform::Debug));
        let viewed = Arc::new(AtomicU32::new(0));

        f.ads
            .show_rewarded("bonus", AdCallbacks::new().on_ad_viewed(counting(&viewed)))
            .await
            .expect("completion flow");

        assert_eq!(viewed.load(Ordering::SeqCst), 1);
        settle().await;
        let sent = f.analytics.sent_named("AdCall");
        assert_eq!(sent[0]["data"]["viewed_reward"], true);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_before_platform_ready_time_out() {
        let adapter = Arc::new(ScriptedAdapter::new(Platform::Debug));
        let recording = RecordingAnalytics::new();
        let clock = Arc::new(ManualClock::at_millis(0));
        let session = Arc::new(RwLock::new(SessionContext::new(
            Platform::Debug,
            "g",
            "s",
            "US",
            "agent",
            0,
        )));
        let analytics = Arc::new(AnalyticsCapability::new(
            Arc::new(recording),
            Arc::clone(&session),
        ));
        // Signal never marks the platform initialized.
        let signal = BootSignal::new(true);
        let ads = AdsCapability::new(
            Arc::new(AdapterSlot::new(
                adapter as Arc<dyn crate::ports::outbound::PlatformAdapter>,
            )),
            analytics,
            AdConfig::default(),
            signal.observer(),
            clock as Arc<dyn TimeProvider>,
            session,
            Duration::from_millis(500),
        );

        let err = ads
            .show_interstitial(AdPlacement::Next, "too early", AdCallbacks::new())
            .await
            .expect_err("bounded wait expires");
        assert_eq!(err.code, ErrorCode::TimedOut);
    }
}
