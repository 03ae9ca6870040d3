//! Container-level health check run by the orchestrator
//!
//! The orchestrator replaces any task with an unhealthy essential container,
//! and only knows about checks declared in the container definition (a check
//! baked into the image is ignored). So a check is always declared here.

use serde::{Deserialize, Serialize};

use crate::defaults::PROBE_HARNESS_SLACK_SECS;
use crate::error::{CheckKind, Result};
use crate::timing::TimingConfig;

const EXIT_ON_FAILURE: &str = " || exit 1";

/// Active command-based health check settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorCheckConfig {
    /// Shell command, as a single-element list
    pub command: Vec<String>,
    pub interval_secs: u32,
    /// Total attempts, not first attempt plus retries
    pub retries: u32,
    /// Failures inside this window are not counted
    pub start_period_secs: u32,
    pub timeout_secs: u32,
}

impl TimingConfig {
    /// Default probe: HTTP GET on the health endpoint.
    ///
    /// `wget` ships in more minimal images than `curl` and exits non-zero on a
    /// non-2xx response.
    pub fn default_probe_command(&self) -> String {
        format!(
            "wget -T {} -O - \"http://localhost:{}{}\"",
            self.timeout, self.container_port, self.endpoint_path
        )
    }

    /// Derive the orchestrator health check.
    ///
    /// `command` replaces the default HTTP probe. The harness timeout is one
    /// second longer than the probe's own timeout so the probe's output is kept
    /// instead of being cut off.
    pub fn derive_orchestrator_check(
        &self,
        command: Option<&str>,
    ) -> Result<OrchestratorCheckConfig> {
        self.check_threshold(CheckKind::Orchestrator)
            .and_then(|()| self.check_timeout(CheckKind::Orchestrator))
            .inspect_err(|err| {
                tracing::debug!(
                    check = %CheckKind::Orchestrator,
                    timeout = self.timeout,
                    interval = self.check_interval_orchestrator,
                    error = %err,
                    "Rejected orchestrator health check"
                );
            })?;

        let probe = match command {
            Some(cmd) if !cmd.trim().is_empty() => cmd.to_string(),
            _ => self.default_probe_command(),
        };

        Ok(OrchestratorCheckConfig {
            command: vec![format!("{}{}", probe, EXIT_ON_FAILURE)],
            interval_secs: self.check_interval_orchestrator,
            retries: self.num_checks_orchestrator,
            start_period_secs: self.max_container_startup,
            timeout_secs: self.timeout.saturating_add(PROBE_HARNESS_SLACK_SECS),
        })
    }
}
