use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rollguard_core::{LbCheckOptions, LbProtocol, TimingConfig};

use super::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "rollguard.toml";

/// Environment used when rollguard.toml declares no [envs.*] sections
pub const IMPLICIT_ENV: &str = "production";

/// Root configuration from rollguard.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RollguardToml {
    /// [service] section - service metadata
    #[serde(default)]
    pub service: ServiceSection,

    /// [health] section - base health check settings
    #[serde(default)]
    pub health: HealthSettings,

    /// [envs.*] sections - per-environment overrides of [health]
    #[serde(default)]
    pub envs: BTreeMap<String, HealthSettings>,
}

/// [service] section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    /// Service name, used in reports
    pub name: Option<String>,
}

/// Health check settings; unset keys fall back to [health], then to defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HealthSettings {
    pub max_container_startup: Option<u32>,
    pub timeout: Option<u32>,
    pub check_interval_orchestrator: Option<u32>,
    pub check_interval_lb: Option<u32>,
    pub num_checks_orchestrator: Option<u32>,
    pub num_checks_lb: Option<u32>,
    pub endpoint_path: Option<String>,
    pub container_port: Option<u16>,

    /// Protocol for load balancer probes (default http)
    pub lb_protocol: Option<LbProtocol>,

    /// Port for load balancer probes (default: traffic port)
    pub lb_port: Option<u16>,

    /// Replaces the default orchestrator HTTP probe
    pub probe_command: Option<String>,
}

impl HealthSettings {
    /// Layer `over` on top of these settings
    pub fn overlay(&self, over: &HealthSettings) -> HealthSettings {
        HealthSettings {
            max_container_startup: over.max_container_startup.or(self.max_container_startup),
            timeout: over.timeout.or(self.timeout),
            check_interval_orchestrator: over
                .check_interval_orchestrator
                .or(self.check_interval_orchestrator),
            check_interval_lb: over.check_interval_lb.or(self.check_interval_lb),
            num_checks_orchestrator: over
                .num_checks_orchestrator
                .or(self.num_checks_orchestrator),
            num_checks_lb: over.num_checks_lb.or(self.num_checks_lb),
            endpoint_path: over
                .endpoint_path
                .clone()
                .or_else(|| self.endpoint_path.clone()),
            container_port: over.container_port.or(self.container_port),
            lb_protocol: over.lb_protocol.or(self.lb_protocol),
            lb_port: over.lb_port.or(self.lb_port),
            probe_command: over
                .probe_command
                .clone()
                .or_else(|| self.probe_command.clone()),
        }
    }

    pub fn timing_config(&self) -> TimingConfig {
        let defaults = TimingConfig::default();
        TimingConfig {
            max_container_startup: self
                .max_container_startup
                .unwrap_or(defaults.max_container_startup),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            check_interval_orchestrator: self
                .check_interval_orchestrator
                .unwrap_or(defaults.check_interval_orchestrator),
            check_interval_lb: self.check_interval_lb.unwrap_or(defaults.check_interval_lb),
            num_checks_orchestrator: self
                .num_checks_orchestrator
                .unwrap_or(defaults.num_checks_orchestrator),
            num_checks_lb: self.num_checks_lb.unwrap_or(defaults.num_checks_lb),
            endpoint_path: self
                .endpoint_path
                .clone()
                .unwrap_or(defaults.endpoint_path),
            container_port: self.container_port.unwrap_or(defaults.container_port),
        }
    }

    pub fn lb_options(&self) -> LbCheckOptions {
        LbCheckOptions {
            protocol: self.lb_protocol.unwrap_or_default(),
            port: self.lb_port,
        }
    }
}

/// Fully resolved settings for one environment
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEnv {
    pub name: String,
    pub timing: TimingConfig,
    pub lb: LbCheckOptions,
    pub probe_command: Option<String>,
}

impl RollguardToml {
    /// Load rollguard.toml from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        tracing::debug!(path = %path.display(), "Loading configuration");
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        Self::parse(&content)
    }

    /// Parse rollguard.toml content
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Environment names, or the implicit one when none are declared
    pub fn env_names(&self) -> Vec<String> {
        if self.envs.is_empty() {
            return vec![IMPLICIT_ENV.to_string()];
        }
        self.envs.keys().cloned().collect()
    }

    /// Resolve a single environment by name
    pub fn resolve_env(&self, name: &str) -> Result<ResolvedEnv> {
        let settings = if self.envs.is_empty() && name == IMPLICIT_ENV {
            self.health.clone()
        } else {
            let overrides = self
                .envs
                .get(name)
                .ok_or_else(|| ConfigError::EnvironmentNotFound(name.to_string()))?;
            self.health.overlay(overrides)
        };

        Ok(ResolvedEnv {
            name: name.to_string(),
            timing: settings.timing_config(),
            lb: settings.lb_options(),
            probe_command: settings.probe_command,
        })
    }

    /// Resolve every environment, in name order
    pub fn resolve_envs(&self) -> Result<Vec<ResolvedEnv>> {
        self.env_names()
            .iter()
            .map(|name| self.resolve_env(name))
            .collect()
    }

    /// Pick the environment a single-environment command should use.
    ///
    /// Without an explicit name this only succeeds when exactly one
    /// environment exists.
    pub fn select_env(&self, requested: Option<&str>) -> Result<ResolvedEnv> {
        if let Some(name) = requested {
            return self.resolve_env(name);
        }

        let names = self.env_names();
        match names.as_slice() {
            [only] => self.resolve_env(only),
            _ => Err(ConfigError::Validation(format!(
                "Multiple environments configured ({}). Pass --env to choose one.",
                names.join(", ")
            ))),
        }
    }
}

/// Starter rollguard.toml with every setting at its default
pub fn starter_config(service_name: &str) -> String {
    let defaults = TimingConfig::default();
    format!(
        r#"[service]
name = {name}

# Orchestrator checks fail fast, load balancer checks fail slowly, so a broken
# deployment is caught and rolled back by the orchestrator.
[health]
max_container_startup = {startup}
timeout = {timeout}
check_interval_orchestrator = {interval_orch}
check_interval_lb = {interval_lb}
num_checks_orchestrator = {checks_orch}
num_checks_lb = {checks_lb}
endpoint_path = "{path}"
container_port = {port}
# lb_protocol = "https"
# lb_port = 8443
# probe_command = "curl -fsS http://localhost:{port}{path}"

[envs.production]
"#,
        name = toml::Value::String(service_name.to_string()),
        startup = defaults.max_container_startup,
        timeout = defaults.timeout,
        interval_orch = defaults.check_interval_orchestrator,
        interval_lb = defaults.check_interval_lb,
        checks_orch = defaults.num_checks_orchestrator,
        checks_lb = defaults.num_checks_lb,
        path = defaults.endpoint_path,
        port = defaults.container_port,
    )
}
