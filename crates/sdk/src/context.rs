//! The SDK context object.
//!
//! Exactly one [`Sdk`] exists per game session. It is an explicit value -
//! constructed once, then passed wherever the game needs it - rather than
//! an ambient global, and it aggregates every capability behind one
//! handle the way the game-facing API exposes them.

use std::sync::{Arc, RwLock};

use hostbridge_domain::{AdConfig, Platform, SdkError, SessionContext};

use crate::application::{
    AdapterSlot, AdsCapability, AnalyticsCapability, CoreCapability, IapCapability,
    LeaderboardCapability, Orchestrator, PlayerCapability,
};
use crate::events::EventHub;
use crate::infrastructure::adapters::{create_adapter, AdapterDeps};
use crate::infrastructure::providers::{
    MemoryStorage, NullScriptLoader, SystemTimeProvider, TracingAnalyticsTransport,
    UnboundForeignSdk,
};
use crate::options::SdkOptions;
use crate::ports::outbound::{
    AnalyticsTransport, EventDispatcher, ForeignSdk, ScriptLoader, StorageProvider, TimeProvider,
};
use crate::state::{BootObserver, BootSignal};

/// Host-environment handles the SDK is built from. Browser embeddings
/// supply DOM-backed implementations; [`BootstrapDeps::headless`] covers
/// everything else.
pub struct BootstrapDeps {
    pub script_loader: Arc<dyn ScriptLoader>,
    pub foreign: Arc<dyn ForeignSdk>,
    pub storage: Arc<dyn StorageProvider>,
    pub time: Arc<dyn TimeProvider>,
    pub dispatcher: Arc<dyn EventDispatcher>,
    pub transport: Arc<dyn AnalyticsTransport>,
}

impl BootstrapDeps {
    /// Defaults for hosts without a DOM: in-memory storage, the system
    /// clock, an in-process event hub, and log-only analytics. Script
    /// injection always fails, which exercises the degraded paths - the
    /// session still ends up playable.
    pub fn headless() -> Self {
        Self {
            script_loader: Arc::new(NullScriptLoader),
            foreign: Arc::new(UnboundForeignSdk),
            storage: Arc::new(MemoryStorage::new()),
            time: Arc::new(SystemTimeProvider),
            dispatcher: Arc::new(EventHub::new()),
            transport: Arc::new(TracingAnalyticsTransport),
        }
    }
}

/// One game session's SDK surface.
pub struct Sdk {
    ads: Arc<AdsCapability>,
    analytics: Arc<AnalyticsCapability>,
    player: Arc<PlayerCapability>,
    core: Arc<CoreCapability>,
    iap: Arc<IapCapability>,
    leaderboard: Arc<LeaderboardCapability>,
    orchestrator: Arc<Orchestrator>,
    boot: BootObserver,
}

impl std::fmt::Debug for Sdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sdk").finish_non_exhaustive()
    }
}

impl Sdk {
    /// Build the SDK without running bootstrap. In manual-init mode the
    /// game follows up with [`Sdk::initialize_async`]; otherwise prefer
    /// [`Sdk::launch`].
    pub fn new(options: SdkOptions, deps: BootstrapDeps) -> Self {
        let platform = options.resolve_platform();
        let started_at = deps.time.now_millis();
        let session = Arc::new(RwLock::new(SessionContext::new(
            platform,
            options.game_id.clone(),
            options.session_id.clone(),
            options.country.clone(),
            options.browser_user_agent.clone(),
            started_at,
        )));

        let signal = BootSignal::new(!options.manual_init);
        let boot = signal.observer();

        let adapter_deps = AdapterDeps {
            script_loader: deps.script_loader,
            foreign: deps.foreign,
            storage: Arc::clone(&deps.storage),
        };
        let slot = Arc::new(AdapterSlot::new(create_adapter(platform, &adapter_deps)));

        let analytics = Arc::new(AnalyticsCapability::new(
            deps.transport,
            Arc::clone(&session),
        ));
        let ads = Arc::new(AdsCapability::new(
            Arc::clone(&slot),
            Arc::clone(&analytics),
            AdConfig::new(options.adsense.clone()),
            boot.clone(),
            Arc::clone(&deps.time),
            Arc::clone(&session),
            options.ready_timeout,
        ));
        let player = Arc::new(PlayerCapability::new(
            Arc::clone(&slot),
            Arc::clone(&deps.storage),
            Arc::clone(&deps.time),
            boot.clone(),
            options.ready_timeout,
        ));
        let core = Arc::new(CoreCapability::new(
            Arc::clone(&slot),
            boot.clone(),
            Arc::clone(&session),
            options.ready_timeout,
        ));
        let iap = Arc::new(IapCapability::new(Arc::clone(&slot)));
        let leaderboard = Arc::new(LeaderboardCapability::new(Arc::clone(&slot)));

        let orchestrator = Arc::new(Orchestrator::new(
            signal,
            slot,
            Arc::clone(&ads),
            Arc::clone(&player),
            Arc::clone(&analytics),
            deps.dispatcher,
            session,
            adapter_deps,
        ));

        Self {
            ads,
            analytics,
            player,
            core,
            iap,
            leaderboard,
            orchestrator,
            boot,
        }
    }

    /// Build the SDK and, in auto-init mode, run the whole bootstrap. In
    /// manual-init mode the SDK is returned unstarted and the game drives
    /// initialization itself.
    pub async fn launch(options: SdkOptions, deps: BootstrapDeps) -> Result<Self, SdkError> {
        let sdk = Self::new(options, deps);
        if sdk.boot.is_auto_init() {
            sdk.orchestrator.run().await?;
        }
        Ok(sdk)
    }

    // ------------------------------------------------------------------
    // Lifecycle (manual-init mode)
    // ------------------------------------------------------------------

    pub async fn initialize_async(&self) -> Result<(), SdkError> {
        self.orchestrator.initialize_async().await
    }

    pub async fn start_game_async(&self) -> Result<(), SdkError> {
        self.orchestrator.start_game_async().await
    }

    // ------------------------------------------------------------------
    // Capabilities
    // ------------------------------------------------------------------

    pub fn ads(&self) -> &AdsCapability {
        &self.ads
    }

    pub fn analytics(&self) -> &AnalyticsCapability {
        &self.analytics
    }

    pub fn player(&self) -> &PlayerCapability {
        &self.player
    }

    pub fn core(&self) -> &CoreCapability {
        &self.core
    }

    pub fn iap(&self) -> &IapCapability {
        &self.iap
    }

    pub fn leaderboard(&self) -> &LeaderboardCapability {
        &self.leaderboard
    }

    // ------------------------------------------------------------------
    // Top-level conveniences, mirroring the game-facing API
    // ------------------------------------------------------------------

    pub fn get_supported_apis(&self) -> Vec<String> {
        self.core.get_supported_apis()
    }

    pub fn set_loading_progress(&self, percent: f64) {
        self.core.set_loading_progress(percent);
    }

    pub fn on_pause(&self, callback: impl FnMut() + Send + 'static) {
        self.core.on_pause(callback);
    }

    pub fn is_initialized(&self) -> bool {
        self.boot.is_initialized()
    }

    pub fn platform(&self) -> Platform {
        self.core.session().platform
    }

    pub fn session(&self) -> SessionContext {
        self.core.session()
    }

    /// Observer over bootstrap progress, for hosts that surface it.
    pub fn status(&self) -> BootObserver {
        self.boot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AdCallbacks;
    use crate::events::SDK_INITIALIZED_EVENT;
    use crate::infrastructure::testing::{RecordingAnalytics, RecordingDispatcher};
    use crate::options::ScriptAttributes;
    use crate::ports::outbound::foreign::MockForeignSdk;
    use crate::ports::outbound::platform::MockScriptLoader;
    use crate::ports::outbound::{AdUnitIds, ForeignError};
    use crate::state::BootPhase;
    use hostbridge_domain::{AdPlacement, ErrorCode};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn counting(count: &Arc<AtomicU32>) -> impl FnMut() + Send + 'static {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn wortal_options() -> SdkOptions {
        SdkOptions::from_launch(
            "https://html5gameportal.com/games/skyblocks?sessid=s-1",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("valid launch url")
    }

    #[tokio::test]
    async fn test_debug_interstitial_end_to_end() {
        init_tracing();
        let sdk = Sdk::launch(SdkOptions::debug("game-1"), BootstrapDeps::headless())
            .await
            .expect("debug bootstrap");
        assert!(sdk.is_initialized());

        let before = Arc::new(AtomicU32::new(0));
        let after = Arc::new(AtomicU32::new(0));
        sdk.ads()
            .show_interstitial(
                AdPlacement::Next,
                "Level2",
                AdCallbacks::new()
                    .on_before_ad(counting(&before))
                    .on_after_ad(counting(&after)),
            )
            .await
            .expect("debug ads always fill");

        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 1);
        assert_eq!(sdk.ads().ads_shown(), 1);
    }

    #[tokio::test]
    async fn test_blocked_ad_script_degrades_but_stays_playable() {
        init_tracing();
        // Headless deps: the ad script cannot load, which on the portal
        // platform means "ad blocker detected".
        let sdk = Sdk::launch(wortal_options(), BootstrapDeps::headless())
            .await
            .expect("degraded bootstrap still completes");

        assert!(sdk.is_initialized());
        assert!(sdk.ads().is_ad_blocked());
        assert_eq!(sdk.platform(), Platform::Wortal);

        let no_fill = Arc::new(AtomicU32::new(0));
        sdk.ads()
            .show_interstitial(
                AdPlacement::Next,
                "level 1",
                AdCallbacks::new().on_no_fill(counting(&no_fill)),
            )
            .await
            .expect("short-circuit");
        assert_eq!(no_fill.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_platform_failure_falls_back_to_debug() {
        // Viber's SDK is not ad-serving: a load failure is a real failure,
        // and the orchestrator retries on the debug adapter.
        let options = SdkOptions::from_launch(
            "https://vbrpl.io/games/skyblocks",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("valid launch url");

        let sdk = Sdk::launch(options, BootstrapDeps::headless())
            .await
            .expect("fallback keeps the game playable");

        assert!(sdk.is_initialized());
        assert_eq!(sdk.platform(), Platform::Debug);
        assert!(!sdk.ads().is_ad_blocked());
    }

    #[tokio::test]
    async fn test_initialized_event_and_game_start_fire_once() {
        let dispatcher = RecordingDispatcher::new();
        let analytics = RecordingAnalytics::new();
        let mut deps = BootstrapDeps::headless();
        deps.dispatcher = Arc::new(dispatcher.clone());
        deps.transport = Arc::new(analytics.clone());

        let sdk = Sdk::launch(SdkOptions::debug("game-1"), deps)
            .await
            .expect("bootstrap");
        assert!(sdk.is_initialized());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(
            dispatcher.events(),
            vec![SDK_INITIALIZED_EVENT.to_string()]
        );
        assert_eq!(analytics.sent_named("GameStart").len(), 1);
    }

    #[tokio::test]
    async fn test_manual_init_flow() {
        let sdk = Sdk::launch(
            SdkOptions::debug("game-1").with_manual_init(true),
            BootstrapDeps::headless(),
        )
        .await
        .expect("manual launch returns unstarted");
        assert!(!sdk.is_initialized());

        // Starting before initializing is a sequencing error.
        let err = sdk.start_game_async().await.expect_err("too early");
        assert_eq!(err.code, ErrorCode::InitializationError);

        sdk.initialize_async().await.expect("manual initialize");
        assert!(sdk.is_initialized());
        sdk.start_game_async().await.expect("game starts");

        // A second initialize is rejected.
        let err = sdk.initialize_async().await.expect_err("already done");
        assert_eq!(err.code, ErrorCode::InitializationError);
    }

    #[tokio::test]
    async fn test_auto_init_rejects_manual_calls() {
        let sdk = Sdk::launch(SdkOptions::debug("game-1"), BootstrapDeps::headless())
            .await
            .expect("auto bootstrap");

        let err = sdk.initialize_async().await.expect_err("auto mode");
        assert_eq!(err.code, ErrorCode::InitializationError);
        let err = sdk.start_game_async().await.expect_err("auto mode");
        assert_eq!(err.code, ErrorCode::InitializationError);
    }

    #[tokio::test]
    async fn test_player_defaults_until_bootstrap_completes() {
        let sdk = Sdk::launch(
            SdkOptions::debug("game-1").with_manual_init(true),
            BootstrapDeps::headless(),
        )
        .await
        .expect("unstarted");

        assert_eq!(sdk.player().id(), "");
        assert_eq!(sdk.ads().config().interstitial_unit_id(), None);

        sdk.initialize_async().await.expect("initialize");

        assert!(!sdk.player().id().is_empty());
        assert_eq!(
            sdk.ads().config().interstitial_unit_id(),
            Some("debug-interstitial")
        );
    }

    #[tokio::test]
    async fn test_subsystem_failure_is_fatal() {
        // Platform attaches fine, but the player fetch rejects: phase 2
        // has no partial-success state.
        let mut loader = MockScriptLoader::new();
        loader.expect_inject().returning(|_| Ok(()));
        loader.expect_global_exists().return_const(true);

        let mut foreign = MockForeignSdk::new();
        foreign.expect_init().returning(|| Ok(()));
        foreign
            .expect_fetch_ad_units()
            .returning(|| Ok(AdUnitIds::default()));
        foreign.expect_fetch_player().returning(|| {
            Err(ForeignError::new("NETWORK_FAILURE", "profile service down"))
        });

        let options = SdkOptions::from_launch(
            "https://apps.fbsbx.com/instant-bundle/skyblocks",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("valid launch url");
        let mut deps = BootstrapDeps::headless();
        deps.script_loader = Arc::new(loader);
        deps.foreign = Arc::new(foreign);

        let err = Sdk::launch(options, deps)
            .await
            .expect_err("half-initialized capabilities must not reach Ready");
        assert_eq!(err.code, ErrorCode::InitializationError);
    }

    #[tokio::test]
    async fn test_supported_apis_follow_the_wrapper_platform() {
        // Portal domain iframed into Telegram: the wrapper wins.
        let options = SdkOptions::from_launch(
            "https://html5gameportal.com/games/skyblocks?telegram=1",
            ScriptAttributes::default(),
            "agent",
        )
        .expect("valid launch url");
        let sdk = Sdk::new(options.with_manual_init(true), BootstrapDeps::headless());

        assert_eq!(sdk.platform(), Platform::Telegram);
        let apis = sdk.get_supported_apis();
        assert!(apis.contains(&"player.getDataAsync".to_string()));
        assert!(!apis.contains(&"iap.getCatalogAsync".to_string()));
    }

    #[tokio::test]
    async fn test_phase_progression_is_observable() {
        let sdk = Sdk::launch(
            SdkOptions::debug("game-1").with_manual_init(true),
            BootstrapDeps::headless(),
        )
        .await
        .expect("unstarted");
        assert_eq!(sdk.status().phase(), BootPhase::Unstarted);

        sdk.initialize_async().await.expect("initialize");
        assert_eq!(sdk.status().phase(), BootPhase::Ready);
        assert!(sdk.status().is_platform_initialized());
        assert!(sdk.status().is_sdk_initialized());
    }
}
