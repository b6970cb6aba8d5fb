// src/provider/openai.rs — OpenAI Chat Completions contract

use serde_json::Value;

use super::{require_text, AnalysisProvider, ProviderDescriptor, ProviderRequest};
use crate::infra::config::OpenAIConfig;
use crate::infra::errors::LucidraError;

const SYSTEM_PROMPT: &str = "You are a strategic business analyst. Analyze the given scenario and provide comprehensive insights including risks, opportunities, and recommendations.";

pub struct OpenAIProvider {
    descriptor: ProviderDescriptor,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAIProvider {
    pub fn new(config: &OpenAIConfig, api_key: Option<String>) -> Self {
        Self {
            descriptor: config.descriptor(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

impl AnalysisProvider for OpenAIProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_request(&self, scenario: &str) -> ProviderRequest {
        let api_key = self.api_key.as_deref().unwrap_or_default();
        ProviderRequest {
            provider: self.descriptor.id.clone(),
            url: format!("{}/chat/completions", self.base_url),
            headers: vec![("Authorization".into(), format!("Bearer {api_key}"))],
            body: serde_json::json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": format!("Analyze this business scenario: {scenario}") },
                ],
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
            }),
        }
    }

    fn extract_analysis(&self, response: &Value) -> Result<String, LucidraError> {
        require_text(
            &self.descriptor.id,
            "choices[0].message.content",
            response["choices"][0]["message"]["content"].as_str(),
        )
    }
}
