// src/provider/anthropic.rs — Anthropic Messages API contract

use serde_json::Value;

use super::{require_text, AnalysisProvider, ProviderDescriptor, ProviderRequest};
use crate::infra::config::AnthropicConfig;
use crate::infra::errors::LucidraError;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    descriptor: ProviderDescriptor,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(config: &AnthropicConfig, api_key: Option<String>) -> Self {
        Self {
            descriptor: config.descriptor(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

impl AnalysisProvider for AnthropicProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_request(&self, scenario: &str) -> ProviderRequest {
        ProviderRequest {
            provider: self.descriptor.id.clone(),
            url: format!("{}/messages", self.base_url),
            headers: vec![
                (
                    "x-api-key".into(),
                    self.api_key.clone().unwrap_or_default(),
                ),
                ("anthropic-version".into(), API_VERSION.into()),
            ],
            body: serde_json::json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [{
                    "role": "user",
                    "content": format!(
                        "As a strategic business analyst, analyze this scenario and provide comprehensive insights: {scenario}"
                    ),
                }],
            }),
        }
    }

    fn extract_analysis(&self, response: &Value) -> Result<String, LucidraError> {
        require_text(
            &self.descriptor.id,
            "content[0].text",
            response["content"][0]["text"].as_str(),
        )
    }
}
