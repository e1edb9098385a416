//! Bootstrap phase tracking.
//!
//! The orchestrator advances a single [`BootPhase`] through the bootstrap
//! sequence; everything else holds a [`BootObserver`] and waits on it.
//! The phase and the monotonic initialization flags are stored in atomics
//! so observers never take a lock, and the progression is one-way: once a
//! phase or flag is reached it never reverts within a session.
//!
//! Waiting is a 100 ms poll bounded by an explicit timeout. A platform
//! script that silently stalls therefore surfaces as a `TIMED_OUT` error
//! instead of hanging the caller forever.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hostbridge_domain::SdkError;

/// Interval between readiness checks while a capability call waits for
/// bootstrap to catch up. Some platforms attach their foreign global
/// slightly after script `onload`, so readiness is observed, not assumed.
pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Phase of the bootstrap state machine.
///
/// Strictly increasing within a session. The degraded ad-block path is not
/// a phase of its own: it reaches `Ready` with the ad-block flag set on the
/// ad configuration. `Failed` is terminal and only entered when even the
/// debug fallback cannot complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BootPhase {
    /// Nothing has run yet.
    Unstarted,
    /// The foreign platform SDK script is loading.
    PlatformLoading,
    /// The platform is attached; internal subsystems may start.
    PlatformReady,
    /// Player profile and ad configuration are being fetched.
    SdkInitializing,
    /// Fully initialized; every capability is usable.
    Ready,
    /// Bootstrap could not complete.
    Failed,
}

impl BootPhase {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            BootPhase::Unstarted => 0,
            BootPhase::PlatformLoading => 1,
            BootPhase::PlatformReady => 2,
            BootPhase::SdkInitializing => 3,
            BootPhase::Ready => 4,
            BootPhase::Failed => 5,
        }
    }

    /// Convert from u8 (atomic storage).
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => BootPhase::PlatformLoading,
            2 => BootPhase::PlatformReady,
            3 => BootPhase::SdkInitializing,
            4 => BootPhase::Ready,
            5 => BootPhase::Failed,
            _ => BootPhase::Unstarted,
        }
    }
}

/// Shared storage behind the signal and all observers.
struct Shared {
    phase: AtomicU8,
    platform_initialized: AtomicBool,
    sdk_initialized: AtomicBool,
    auto_init: bool,
}

/// Writer half - owned by the orchestrator.
pub struct BootSignal {
    shared: Arc<Shared>,
}

impl BootSignal {
    pub fn new(auto_init: bool) -> Self {
        Self {
            shared: Arc::new(Shared {
                phase: AtomicU8::new(BootPhase::Unstarted.to_u8()),
                platform_initialized: AtomicBool::new(false),
                sdk_initialized: AtomicBool::new(false),
                auto_init,
            }),
        }
    }

    /// Create a read-only observer sharing this signal's state.
    pub fn observer(&self) -> BootObserver {
        BootObserver {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Advance to `phase`. Regressions are ignored - the progression is
    /// monotonic, so a late writer can never move the machine backwards.
    pub fn advance(&self, phase: BootPhase) {
        self.shared.phase.fetch_max(phase.to_u8(), Ordering::SeqCst);
    }

    pub fn mark_platform_initialized(&self) {
        self.shared
            .platform_initialized
            .store(true, Ordering::SeqCst);
    }

    pub fn mark_sdk_initialized(&self) {
        self.shared.sdk_initialized.store(true, Ordering::SeqCst);
    }
}

/// Read-only view of bootstrap progress. Cheap to clone and share.
#[derive(Clone)]
pub struct BootObserver {
    shared: Arc<Shared>,
}

impl BootObserver {
    pub fn phase(&self) -> BootPhase {
        BootPhase::from_u8(self.shared.phase.load(Ordering::SeqCst))
    }

    pub fn is_platform_initialized(&self) -> bool {
        self.shared.platform_initialized.load(Ordering::SeqCst)
    }

    pub fn is_sdk_initialized(&self) -> bool {
        self.shared.sdk_initialized.load(Ordering::SeqCst)
    }

    pub fn is_auto_init(&self) -> bool {
        self.shared.auto_init
    }

    /// True once the whole bootstrap sequence completed.
    pub fn is_initialized(&self) -> bool {
        self.phase() == BootPhase::Ready
    }

    /// Wait until the platform phase completed, failing with `TIMED_OUT`
    /// after `timeout`. `api` names the caller for error context.
    pub async fn wait_platform_ready(&self, timeout: Duration, api: &str) -> Result<(), SdkError> {
        self.wait_until(timeout, api, |o| o.is_platform_initialized())
            .await
    }

    /// Wait until the bootstrap reached `Ready`.
    pub async fn wait_ready(&self, timeout: Duration, api: &str) -> Result<(), SdkError> {
        self.wait_until(timeout, api, |o| o.is_initialized()).await
    }

    async fn wait_until(
        &self,
        timeout: Duration,
        api: &str,
        done: impl Fn(&BootObserver) -> bool,
    ) -> Result<(), SdkError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if done(self) {
                return Ok(());
            }
            if self.phase() == BootPhase::Failed {
                return Err(SdkError::initialization("bootstrap failed"));
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(SdkError::timed_out(api));
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }
}
