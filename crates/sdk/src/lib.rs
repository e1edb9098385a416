//! Hostbridge SDK.
//!
//! One API surface for games embedded on a dozen hosting platforms. The
//! crate resolves the platform once at startup, runs the multi-stage
//! bootstrap (foreign SDK load, then internal subsystems), and dispatches
//! every capability call through the adapter selected for that platform.
//!
//! Entry point: [`Sdk::launch`] with [`SdkOptions`] and a
//! [`context::BootstrapDeps`] bundle describing the host environment.

pub mod application;
pub mod context;
pub mod events;
pub mod infrastructure;
pub mod options;
pub mod ports;
pub mod state;

pub use application::{AdCallback, AdCallbacks};
pub use context::{BootstrapDeps, Sdk};
pub use events::SDK_INITIALIZED_EVENT;
pub use options::{ScriptAttributes, SdkOptions};

// The domain vocabulary is part of the public surface.
pub use hostbridge_domain as domain;
