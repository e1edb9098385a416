//! Adapter selection.
//!
//! One adapter per resolved platform, chosen once at startup by table
//! lookup. Debug gets the stub adapter; every other platform gets the
//! shared hosted adapter parameterized by its descriptor.

use std::sync::Arc;

use hostbridge_domain::Platform;

use crate::ports::outbound::{ForeignSdk, PlatformAdapter, ScriptLoader, StorageProvider};

use super::debug::DebugAdapter;
use super::descriptor::descriptor;
use super::hosted::HostedAdapter;

/// Host-environment handles the adapters are built from.
#[derive(Clone)]
pub struct AdapterDeps {
    pub script_loader: Arc<dyn ScriptLoader>,
    pub foreign: Arc<dyn ForeignSdk>,
    pub storage: Arc<dyn StorageProvider>,
}

/// Build the adapter for a platform.
pub fn create_adapter(platform: Platform, deps: &AdapterDeps) -> Arc<dyn PlatformAdapter> {
    match platform {
        Platform::Debug => Arc::new(DebugAdapter::new(Arc::clone(&deps.storage))),
        Platform::Wortal
        | Platform::Link
        | Platform::Viber
        | Platform::Facebook
        | Platform::Gd
        | Platform::CrazyGames
        | Platform::GamePix
        | Platform::Poki
        | Platform::Telegram
        | Platform::GameMonetize
        | Platform::AddictingGames
        | Platform::Yandex => Arc::new(HostedAdapter::new(
            descriptor(platform),
            Arc::clone(&deps.script_loader),
            Arc::clone(&deps.foreign),
        )),
    }
}
