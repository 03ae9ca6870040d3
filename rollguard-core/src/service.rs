//! Service-level health check grace period
//!
//! The grace period applies to both the orchestrator and LB checks. Failed
//! probes inside it still count, but nothing is stopped. If the LB reaches its
//! threshold while the grace period is still running, both subsystems act on
//! the task at once and the LB can win, so the period is kept short.

use serde::{Deserialize, Serialize};

use crate::defaults::SERVICE_GRACE_PERIOD_SECS;
use crate::error::Result;
use crate::timing::TimingConfig;

/// Health-related service properties.
///
/// Minimum and maximum healthy percentages are left at platform defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGraceConfig {
    pub health_check_grace_period_secs: u32,
}

impl TimingConfig {
    pub fn derive_service_grace_settings(&self) -> Result<ServiceGraceConfig> {
        self.check_grace_period().inspect_err(|err| {
            tracing::debug!(
                grace_period = SERVICE_GRACE_PERIOD_SECS,
                earliest_lb = self.earliest_lb_unhealthy_bound(),
                error = %err,
                "Rejected service grace period"
            );
        })?;

        Ok(ServiceGraceConfig {
            health_check_grace_period_secs: SERVICE_GRACE_PERIOD_SECS,
        })
    }
}
