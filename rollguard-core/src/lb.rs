//! Load balancer target group health check
//!
//! The LB uses one check both to admit new tasks to traffic and to detect that
//! a running task broke, and it stops tasks it considers unhealthy. A task it
//! stops during startup never shows up as a failed deployment, so this check is
//! derived to be deliberately slow.

use serde::{Deserialize, Serialize};

use crate::error::{CheckKind, Result};
use crate::timing::TimingConfig;

/// Protocol the LB uses for its probes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LbProtocol {
    #[default]
    Http,
    Https,
}

impl std::fmt::Display for LbProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LbProtocol::Http => f.write_str("HTTP"),
            LbProtocol::Https => f.write_str("HTTPS"),
        }
    }
}

impl std::str::FromStr for LbProtocol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(LbProtocol::Http),
            "https" => Ok(LbProtocol::Https),
            other => Err(format!("unsupported load balancer protocol '{}'", other)),
        }
    }
}

/// Caller choices for the LB check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LbCheckOptions {
    pub protocol: LbProtocol,
    /// Probe a different port; `None` probes the traffic port
    pub port: Option<u16>,
}

/// Passive LB health check settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LbCheckConfig {
    pub interval_secs: u32,
    pub timeout_secs: u32,
    pub path: String,
    /// `None` means the LB probes the port traffic is sent to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub protocol: LbProtocol,
    pub unhealthy_threshold: u32,
    /// Never set: unhealthy tasks are always replaced, not recovered in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy_threshold: Option<u32>,
}

impl TimingConfig {
    /// Derive the LB health check.
    ///
    /// Fails if a probe could outlast the LB interval, or if the LB could mark
    /// a task unhealthy more than the race margin before the orchestrator.
    pub fn derive_lb_check(&self, options: &LbCheckOptions) -> Result<LbCheckConfig> {
        self.check_threshold(CheckKind::Lb)
            .and_then(|()| self.check_timeout(CheckKind::Lb))
            .and_then(|()| self.check_race())
            .inspect_err(|err| {
                tracing::debug!(
                    check = %CheckKind::Lb,
                    earliest_lb = self.earliest_lb_unhealthy_bound(),
                    latest_orchestrator = self.latest_orchestrator_unhealthy_bound(),
                    error = %err,
                    "Rejected load balancer health check"
                );
            })?;

        Ok(LbCheckConfig {
            interval_secs: self.check_interval_lb,
            timeout_secs: self.timeout,
            path: self.endpoint_path.clone(),
            port: options.port,
            protocol: options.protocol,
            unhealthy_threshold: self.num_checks_lb,
            healthy_threshold: None,
        })
    }
}
