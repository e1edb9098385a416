//! Bootstrap state tracking.

pub mod init;

pub use init::{BootObserver, BootPhase, BootSignal, READY_POLL_INTERVAL};
