// src/cli/serve.rs — `lucidra serve`

use std::sync::Arc;
use std::time::Duration;

use crate::api::{self, ApiState};
use crate::core::ScenarioService;
use crate::infra::config::Config;
use crate::provider::resolver::Credentials;

pub async fn run_serve(mut config: Config, port: Option<u16>, host: Option<String>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    let service = Arc::new(ScenarioService::from_config(&config, &Credentials::from_env()));

    let interval = Duration::from_secs(config.sessions.sweep_interval_minutes.max(1) * 60);
    let sweeper = service.spawn_sweeper(interval, config.sessions.max_age_hours);
    tracing::info!(
        max_age_hours = config.sessions.max_age_hours,
        interval_secs = interval.as_secs(),
        "Session sweeper started"
    );

    let result = api::start_server(&config.server, ApiState::new(service)).await;
    sweeper.abort();
    result
}
