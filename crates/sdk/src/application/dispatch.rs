//! Adapter dispatch slot.
//!
//! Capabilities dispatch through this slot rather than holding the adapter
//! directly. The adapter is selected once at startup; the one sanctioned
//! replacement is the bootstrap fallback to the debug adapter, which
//! happens before readiness is observable, so no capability call ever sees
//! the swap.

use std::sync::{Arc, RwLock};

use crate::ports::outbound::PlatformAdapter;

use super::{read_lock, write_lock};

pub struct AdapterSlot {
    inner: RwLock<Arc<dyn PlatformAdapter>>,
}

impl AdapterSlot {
    pub fn new(adapter: Arc<dyn PlatformAdapter>) -> Self {
        Self {
            inner: RwLock::new(adapter),
        }
    }

    /// The currently selected adapter.
    pub fn get(&self) -> Arc<dyn PlatformAdapter> {
        Arc::clone(&read_lock(&self.inner))
    }

    /// Replace the adapter. Bootstrap fallback only.
    pub(crate) fn replace(&self, adapter: Arc<dyn PlatformAdapter>) {
        *write_lock(&self.inner) = adapter;
    }
}
