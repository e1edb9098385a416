//! Initialization orchestrator.
//!
//! Drives the bootstrap sequence: platform loading, then the internal
//! subsystems, then Ready. Two recoveries are built in - a blocked ad
//! script degrades instead of failing, and an outright platform failure
//! falls back to the debug adapter - because an initialization failure
//! must never leave the game unplayable, only degraded.
//!
//! In auto-init mode the orchestrator runs unattended at launch; in
//! manual-init mode the game drives it through `initialize_async` and
//! `start_game_async`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use hostbridge_domain::{Platform, SdkError, SessionContext};

use crate::events::SDK_INITIALIZED_EVENT;
use crate::infrastructure::adapters::{create_adapter, AdapterDeps};
use crate::ports::outbound::{EventDispatcher, PlatformReadiness};
use crate::state::{BootObserver, BootPhase, BootSignal};

use super::ads::AdsCapability;
use super::analytics::AnalyticsCapability;
use super::dispatch::AdapterSlot;
use super::player::PlayerCapability;
use super::write_lock;

pub struct Orchestrator {
    signal: BootSignal,
    observer: BootObserver,
    slot: Arc<AdapterSlot>,
    ads: Arc<AdsCapability>,
    player: Arc<PlayerCapability>,
    analytics: Arc<AnalyticsCapability>,
    dispatcher: Arc<dyn EventDispatcher>,
    session: Arc<RwLock<SessionContext>>,
    /// Retained to build the debug adapter if the platform falls over.
    adapter_deps: AdapterDeps,
    ready_announced: AtomicBool,
    game_started: AtomicBool,
}

impl Orchestrator {
    pub(crate) fn new(
        signal: BootSignal,
        slot: Arc<AdapterSlot>,
        ads: Arc<AdsCapability>,
        player: Arc<PlayerCapability>,
        analytics: Arc<AnalyticsCapability>,
        dispatcher: Arc<dyn EventDispatcher>,
        session: Arc<RwLock<SessionContext>>,
        adapter_deps: AdapterDeps,
    ) -> Self {
        let observer = signal.observer();
        Self {
            signal,
            observer,
            slot,
            ads,
            player,
            analytics,
            dispatcher,
            session,
            adapter_deps,
            ready_announced: AtomicBool::new(false),
            game_started: AtomicBool::new(false),
        }
    }

    pub fn observer(&self) -> BootObserver {
        self.observer.clone()
    }

    /// Run the whole bootstrap sequence.
    pub(crate) async fn run(&self) -> Result<(), SdkError> {
        self.initialize_platform_async().await?;
        self.initialize_sdk_async().await
    }

    // ------------------------------------------------------------------
    // Phase 1: platform loading
    // ------------------------------------------------------------------

    async fn initialize_platform_async(&self) -> Result<(), SdkError> {
        self.signal.advance(BootPhase::PlatformLoading);

        let adapter = self.slot.get();
        match adapter.initialize_platform_async().await {
            Ok(PlatformReadiness::Ready) => {}
            Ok(PlatformReadiness::AdBlocked) => {
                tracing::warn!(
                    platform = %adapter.platform(),
                    "ad blocker detected during platform load; ads disabled for this session"
                );
                self.ads.set_ad_blocked(true);
            }
            Err(e) => {
                if adapter.platform() == Platform::Debug {
                    // Nothing left to fall back to.
                    self.signal.advance(BootPhase::Failed);
                    return Err(e);
                }
                tracing::error!(
                    platform = %adapter.platform(),
                    error = %e,
                    "platform failed to load; retrying with the debug adapter"
                );
                self.fall_back_to_debug();
                if let Err(e) = self.slot.get().initialize_platform_async().await {
                    self.signal.advance(BootPhase::Failed);
                    return Err(e);
                }
            }
        }

        self.signal.mark_platform_initialized();
        self.signal.advance(BootPhase::PlatformReady);
        Ok(())
    }

    /// Swap in the debug adapter so the game stays playable with stub
    /// capabilities. Happens before readiness is observable, so no
    /// capability call can see a half-swapped state.
    fn fall_back_to_debug(&self) {
        let debug = create_adapter(Platform::Debug, &self.adapter_deps);
        self.slot.replace(debug);
        write_lock(&self.session).platform = Platform::Debug;
    }

    // ------------------------------------------------------------------
    // Phase 2: internal subsystems
    // ------------------------------------------------------------------

    async fn initialize_sdk_async(&self) -> Result<(), SdkError> {
        self.signal.advance(BootPhase::SdkInitializing);

        let result: Result<(), SdkError> = async {
            self.slot.get().initialize_sdk_async().await?;
            // Player profile and ad configuration are independent; fetch
            // them concurrently, but require both before Ready - the game
            // never starts with half-initialized capabilities.
            let (locale, ()) =
                tokio::try_join!(self.player.initialize(), self.ads.load_ad_units())?;
            if let Some(locale) = locale {
                write_lock(&self.session).set_locale(locale);
            }
            Ok(())
        }
        .await;

        if let Err(e) = result {
            self.signal.advance(BootPhase::Failed);
            return Err(SdkError::initialization(format!(
                "subsystem initialization failed: {}",
                e.message
            )));
        }

        self.signal.mark_sdk_initialized();
        self.signal.advance(BootPhase::Ready);

        if !self.ready_announced.swap(true, Ordering::SeqCst) {
            self.dispatcher.dispatch(SDK_INITIALIZED_EVENT);
            self.analytics.log_game_start();
            tracing::info!(
                platform = %self.slot.get().platform(),
                "SDK initialized"
            );
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Manual-init surface
    // ------------------------------------------------------------------

    pub async fn initialize_async(&self) -> Result<(), SdkError> {
        if self.observer.is_auto_init() {
            return Err(SdkError::initialization(
                "SDK initializes automatically; initializeAsync is not callable",
            ));
        }
        if self.observer.phase() != BootPhase::Unstarted {
            return Err(SdkError::initialization(
                "initialization has already been attempted",
            ));
        }
        self.run().await
    }

    pub async fn start_game_async(&self) -> Result<(), SdkError> {
        if self.observer.is_auto_init() {
            return Err(SdkError::initialization(
                "SDK starts the game automatically; startGameAsync is not callable",
            ));
        }
        if !self.observer.is_initialized() {
            return Err(SdkError::initialization(
                "initializeAsync must succeed before startGameAsync",
            ));
        }
        self.slot.get().set_loading_progress_impl(100);
        if !self.game_started.swap(true, Ordering::SeqCst) {
            tracing::info!("game started");
        }
        Ok(())
    }
}
