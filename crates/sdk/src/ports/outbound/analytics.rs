//! Analytics transport port.

use async_trait::async_trait;

/// Delivers one analytics payload to the backend. The wire format and
/// batching strategy are the implementation's concern; the capability
/// layer only guarantees at-most-one terminal event per ad request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsTransport: Send + Sync {
    async fn send(&self, payload: serde_json::Value) -> anyhow::Result<()>;
}
