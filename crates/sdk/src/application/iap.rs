//! In-app purchase facade.
//!
//! Purchasing is platform-bound functionality behind the out-of-scope
//! foreign bindings. The facade exists so games get the uniform async
//! rejection path - a `NOT_SUPPORTED` rejection - instead of a missing
//! method, and can feature-gate their store UI on `is_enabled`.

use std::sync::Arc;

use hostbridge_domain::SdkError;
use serde::{Deserialize, Serialize};

use super::dispatch::AdapterSlot;

pub const API_GET_CATALOG: &str = "iap.getCatalogAsync";

/// A purchasable product as platforms describe it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub price_currency_code: String,
}

pub struct IapCapability {
    slot: Arc<AdapterSlot>,
}

impl IapCapability {
    pub fn new(slot: Arc<AdapterSlot>) -> Self {
        Self { slot }
    }

    /// Whether the current platform has a purchasing API at all.
    pub fn is_enabled(&self) -> bool {
        self.slot.get().supported_apis().contains(&API_GET_CATALOG)
    }

    pub async fn get_catalog_async(&self) -> Result<Vec<Product>, SdkError> {
        if !self.is_enabled() {
            return Err(SdkError::not_supported(API_GET_CATALOG));
        }
        // Catalog retrieval needs the platform's purchasing binding,
        // which is not wired in this build.
        Err(SdkError::not_supported(API_GET_CATALOG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::ScriptedAdapter;
    use crate::ports::outbound::PlatformAdapter;
    use hostbridge_domain::{ErrorCode, Platform};

    fn iap_on(platform: Platform) -> IapCapability {
        IapCapability::new(Arc::new(AdapterSlot::new(
            Arc::new(ScriptedAdapter::new(platform)) as Arc<dyn PlatformAdapter>,
        )))
    }

    #[test]
    fn test_enablement_follows_platform_declaration() {
        assert!(iap_on(Platform::Facebook).is_enabled());
        assert!(!iap_on(Platform::Telegram).is_enabled());
    }

    #[tokio::test]
    async fn test_catalog_rejects_with_not_supported() {
        let err = iap_on(Platform::Telegram)
            .get_catalog_async()
            .await
            .expect_err("telegram has no iap");
        assert_eq!(err.code, ErrorCode::NotSupported);
        assert_eq!(err.context, API_GET_CATALOG);
    }
}
