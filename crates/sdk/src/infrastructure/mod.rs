//! Infrastructure adapters: platform integrations, default port
//! implementations, and the foreign error translation table.

pub mod adapters;
pub mod providers;
pub mod translation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
