//! Voice Query Handlers

use std::sync::Arc;

use crate::application::gateway::VendorGateway;
use crate::application::ports::HttpMethod;
use crate::application::queries::ListVoices;
use crate::domain::voice::VoiceListing;

/// ListVoices Handler
///
/// 尽力而为：任何失败都打印诊断信息并返回空清单，不阻塞后续的克隆
pub struct ListVoicesHandler {
    gateway: Arc<VendorGateway>,
}

impl ListVoicesHandler {
    pub fn new(gateway: Arc<VendorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, _query: ListVoices) -> VoiceListing {
        let vendor = self.gateway.vendor();
        let reporter = self.gateway.reporter();

        let request = self
            .gateway
            .request(HttpMethod::Get, vendor.list_url(), false);
        let Ok(response) = self.gateway.send_guarded(request).await else {
            return VoiceListing::empty();
        };

        if response.status != 200 {
            reporter.line(format!("Error listing voices: {}", response.status));
            reporter.line(&response.body);
            return VoiceListing::empty();
        }

        let Some(listing) = response
            .json()
            .and_then(|body| vendor.parse_listing(&body))
        else {
            tracing::warn!(vendor = %vendor.vendor(), "Unrecognized voice list response");
            reporter.line(format!("Response: {}", response.body));
            return VoiceListing::empty();
        };

        reporter.line(format!("\nFound {} voices:", listing.len()));
        for entry in listing.entries() {
            reporter.line(format!("  - {}: {}", entry.name, entry.voice_id));
        }

        tracing::debug!(vendor = %vendor.vendor(), count = listing.len(), "Voices listed");
        listing
    }
}
