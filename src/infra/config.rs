// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::infra::errors::LucidraError;
use crate::infra::paths;
use crate::provider::ProviderDescriptor;
use crate::usage::{Plan, PlanTable};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plans: PlanTable,

    #[serde(default)]
    pub sessions: SessionsConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    pub default_plan: Plan,
    pub max_age_hours: u64,
    pub sweep_interval_minutes: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            default_plan: Plan::Free,
            max_age_hours: 24,
            sweep_interval_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Provider id tried first, ahead of priority order.
    pub preferred: Option<String>,
    /// Base of the exponential retry delay (delay = base * 2^attempt).
    pub backoff_base_ms: u64,
    pub primary: PrimaryConfig,
    pub openai: OpenAIConfig,
    pub anthropic: AnthropicConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            preferred: None,
            backoff_base_ms: 1_000,
            primary: PrimaryConfig::default(),
            openai: OpenAIConfig::default(),
            anthropic: AnthropicConfig::default(),
        }
    }
}

impl ProvidersConfig {
    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }
}

/// In-house analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryConfig {
    pub url: String,
    pub priority: u32,
    pub max_attempts: u32,
    pub timeout_seconds: u64,
    pub cost_per_token: f64,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".into(),
            priority: 1,
            max_attempts: 2,
            timeout_seconds: 30,
            cost_per_token: 0.001,
        }
    }
}

impl PrimaryConfig {
    pub fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(
            "primary",
            self.priority,
            self.cost_per_token,
            self.max_attempts,
            Duration::from_secs(self.timeout_seconds),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub priority: u32,
    pub max_attempts: u32,
    pub timeout_seconds: u64,
    pub cost_per_token: f64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4".into(),
            max_tokens: 1_000,
            temperature: 0.7,
            priority: 2,
            max_attempts: 3,
            timeout_seconds: 45,
            cost_per_token: 0.002,
        }
    }
}

impl OpenAIConfig {
    pub fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(
            "openai",
            self.priority,
            self.cost_per_token,
            self.max_attempts,
            Duration::from_secs(self.timeout_seconds),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub priority: u32,
    pub max_attempts: u32,
    pub timeout_seconds: u64,
    pub cost_per_token: f64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1".into(),
            model: "claude-3-sonnet-20240229".into(),
            max_tokens: 1_000,
            priority: 3,
            max_attempts: 2,
            timeout_seconds: 60,
            cost_per_token: 0.0015,
        }
    }
}

impl AnthropicConfig {
    pub fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(
            "anthropic",
            self.priority,
            self.cost_per_token,
            self.max_attempts,
            Duration::from_secs(self.timeout_seconds),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults. Environment
    /// overrides are applied either way.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match paths::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| LucidraError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// `AI_SERVICE_URL` points the primary provider elsewhere.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("AI_SERVICE_URL") {
            if !url.trim().is_empty() {
                self.providers.primary.url = url;
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.plans.validate()?;
        let attempts = [
            ("primary", self.providers.primary.max_attempts),
            ("openai", self.providers.openai.max_attempts),
            ("anthropic", self.providers.anthropic.max_attempts),
        ];
        for (id, max_attempts) in attempts {
            if max_attempts == 0 {
                return Err(LucidraError::Config(format!(
                    "providers.{id}.max_attempts must be at least 1"
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::PlanLimits;
    use std::io::Write;

    #[test]
    fn test_defaults_reasonable() {
        let c = Config::default();
        assert_eq!(c.plans.limits(Plan::Free), PlanLimits::new(1_000, 5));
        assert_eq!(c.sessions.default_plan, Plan::Free);
        assert_eq!(c.sessions.max_age_hours, 24);
        assert_eq!(c.providers.backoff_base_ms, 1_000);
        assert!(c.providers.preferred.is_none());
        assert_eq!(c.server.port, 8080);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_provider_defaults() {
        let p = ProvidersConfig::default();
        assert_eq!(p.primary.priority, 1);
        assert_eq!(p.primary.max_attempts, 2);
        assert_eq!(p.openai.priority, 2);
        assert_eq!(p.openai.max_attempts, 3);
        assert_eq!(p.openai.model, "gpt-4");
        assert_eq!(p.anthropic.priority, 3);
        assert_eq!(p.anthropic.timeout_seconds, 60);
    }

    #[test]
    fn test_descriptor_from_config() {
        let d = OpenAIConfig::default().descriptor();
        assert_eq!(d.id, "openai");
        assert_eq!(d.max_attempts, 3);
        assert_eq!(d.timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.providers.primary.url, "http://localhost:5000");
        assert_eq!(config.plans, PlanTable::default());
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml_str = r#"
[plans.free]
max_tokens = 500
max_calls = 3

[sessions]
default_plan = "basic"

[providers]
preferred = "anthropic"
backoff_base_ms = 250

[providers.openai]
model = "gpt-4o"

[server]
port = 9000
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.plans.limits(Plan::Free), PlanLimits::new(500, 3));
        assert_eq!(config.plans.limits(Plan::Basic), PlanLimits::new(10_000, 50));
        assert_eq!(config.sessions.default_plan, Plan::Basic);
        assert_eq!(config.sessions.max_age_hours, 24);
        assert_eq!(config.providers.preferred.as_deref(), Some("anthropic"));
        assert_eq!(config.providers.backoff_base(), Duration::from_millis(250));
        assert_eq!(config.providers.openai.model, "gpt-4o");
        assert_eq!(config.providers.openai.max_attempts, 3);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_rejects_inverted_plans() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[plans.basic]\nmax_tokens = 100\nmax_calls = 50\n"
        )
        .unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_load_from_rejects_zero_attempts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[providers.primary]\nmax_attempts = 0\n").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7070\n").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 7070);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.plans, config.plans);
        assert_eq!(deserialized.server.port, config.server.port);
    }
}
