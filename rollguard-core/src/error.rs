use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which health check subsystem a violation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Passive HTTP check run by the load balancer
    Lb,
    /// Active command check run by the container orchestrator
    Orchestrator,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Lb => f.write_str("load balancer"),
            CheckKind::Orchestrator => f.write_str("orchestrator"),
        }
    }
}

/// Timing violations found while deriving health check configuration.
///
/// Every variant is a mistake in static settings and is fatal to the
/// derivation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("{check} health check timeout ({timeout}s) is not shorter than its repeat interval ({interval}s)")]
    TimeoutExceedsInterval {
        check: CheckKind,
        timeout: u32,
        interval: u32,
    },

    #[error(
        "load balancer could mark a task unhealthy after {earliest_lb}s, before the orchestrator \
         does at {latest_orchestrator}s (allowed margin {margin}s)"
    )]
    RaceConditionRisk {
        earliest_lb: u64,
        latest_orchestrator: u64,
        margin: u64,
    },

    #[error(
        "service grace period ({grace_period}s) outlasts the earliest load balancer unhealthy \
         mark ({earliest_lb}s)"
    )]
    GracePeriodTooLong { grace_period: u32, earliest_lb: u64 },

    #[error("{check} health check needs at least one failed probe to mark a task unhealthy")]
    ZeroThreshold { check: CheckKind },
}

/// All violations found for one configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_violations(.0))]
pub struct ValidationErrors(pub Vec<TimingError>);

impl ValidationErrors {
    pub fn violations(&self) -> &[TimingError] {
        &self.0
    }
}

fn render_violations(errors: &[TimingError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, TimingError>;
