use std::path::Path;

use crate::config::{ConfigError, RollguardToml};
use crate::validation;

pub fn run(
    config_path: &Path,
    env: Option<&str>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = RollguardToml::load_from_file(config_path)?;
    let env = config.select_env(env)?;

    let warnings = validation::validate_settings(&env).into_result()?;
    for warning in &warnings {
        tracing::warn!(env = %env.name, "{}", warning);
    }

    let plan = env
        .timing
        .plan(&env.lb, env.probe_command.as_deref())
        .map_err(|source| ConfigError::InvalidTiming {
            env: env.name.clone(),
            source,
        })?;

    tracing::info!(env = %env.name, "Rendered health check plan");

    let json = if compact {
        serde_json::to_string(&plan).map_err(ConfigError::from)?
    } else {
        serde_json::to_string_pretty(&plan).map_err(ConfigError::from)?
    };
    println!("{}", json);

    let bounds = env.timing.bounds();
    tracing::debug!(
        earliest_lb = bounds.earliest_lb_unhealthy,
        latest_orchestrator = bounds.latest_orchestrator_unhealthy,
        slack = bounds.slack,
        "Timing bounds"
    );
    Ok(())
}
