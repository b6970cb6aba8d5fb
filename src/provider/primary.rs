// src/provider/primary.rs — In-house analysis service ({scenario} -> {ai_analysis})

use serde_json::Value;

use super::{require_text, AnalysisProvider, ProviderDescriptor, ProviderRequest};
use crate::infra::config::PrimaryConfig;
use crate::infra::errors::LucidraError;

pub struct PrimaryProvider {
    descriptor: ProviderDescriptor,
    base_url: String,
}

impl PrimaryProvider {
    pub fn new(config: &PrimaryConfig) -> Self {
        Self {
            descriptor: config.descriptor(),
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/analyze_scenario", self.base_url)
    }
}

impl AnalysisProvider for PrimaryProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    // Needs no credential; only a target.
    fn is_available(&self) -> bool {
        !self.base_url.is_empty()
    }

    fn build_request(&self, scenario: &str) -> ProviderRequest {
        ProviderRequest {
            provider: self.descriptor.id.clone(),
            url: self.endpoint(),
            headers: vec![],
            body: serde_json::json!({ "scenario": scenario }),
        }
    }

    fn extract_analysis(&self, response: &Value) -> Result<String, LucidraError> {
        require_text(
            &self.descriptor.id,
            "ai_analysis",
            response["ai_analysis"].as_str(),
        )
    }
}
