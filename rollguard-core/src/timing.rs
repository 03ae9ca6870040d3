//! Timing model for the two health check subsystems
//!
//! The orchestrator check must always mark a broken task unhealthy before the
//! load balancer does. The LB stops tasks on its own, and a task stopped by the
//! LB is invisible to the orchestrator's deployment rollback. Configure the
//! orchestrator check to fail fast and the LB check to fail very slowly.

use serde::{Deserialize, Serialize};

use crate::defaults::*;
use crate::error::{CheckKind, TimingError};

/// Health check timing settings for one deployment environment.
///
/// Built once from static settings and never mutated. Invariants are checked
/// when configuration is derived, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Seconds from container start until it can serve traffic, worst case
    pub max_container_startup: u32,

    /// Seconds to wait for a single probe before counting it as failed
    pub timeout: u32,

    /// Seconds between orchestrator probes
    pub check_interval_orchestrator: u32,

    /// Seconds between LB probes
    pub check_interval_lb: u32,

    /// Consecutive failed orchestrator probes before the task is unhealthy
    pub num_checks_orchestrator: u32,

    /// Consecutive failed LB probes before the task is unhealthy
    pub num_checks_lb: u32,

    /// Absolute path of the health endpoint
    pub endpoint_path: String,

    /// TCP port the container listens on
    pub container_port: u16,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_container_startup: DEFAULT_MAX_CONTAINER_STARTUP_SECS,
            timeout: DEFAULT_TIMEOUT_SECS,
            check_interval_orchestrator: DEFAULT_CHECK_INTERVAL_ORCHESTRATOR_SECS,
            check_interval_lb: DEFAULT_CHECK_INTERVAL_LB_SECS,
            num_checks_orchestrator: DEFAULT_NUM_CHECKS_ORCHESTRATOR,
            num_checks_lb: DEFAULT_NUM_CHECKS_LB,
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            container_port: DEFAULT_CONTAINER_PORT,
        }
    }
}

/// Snapshot of the derived timing values, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingBounds {
    /// Shortest plausible spacing between LB probes
    pub effective_lb_interval: u32,
    /// Longest spacing between the starts of two orchestrator probes
    pub actual_orchestrator_interval: u64,
    pub earliest_lb_unhealthy: u64,
    pub latest_orchestrator_unhealthy: u64,
    pub race_margin: u64,
    /// `earliest_lb_unhealthy + race_margin - latest_orchestrator_unhealthy`
    pub slack: i64,
}

impl TimingBounds {
    pub fn orchestrator_wins(&self) -> bool {
        self.slack >= 0
    }
}

impl TimingConfig {
    /// Shortest real interval between LB probes.
    ///
    /// The configured interval is treated as an upper bound; the LB may poll up
    /// to 20% (at least 2s) sooner. Long or timed-out requests do not delay the
    /// next probe.
    pub fn effective_lb_interval(&self) -> u32 {
        let interval = self.check_interval_lb;
        // floor(i - max(2, i * 0.2)) == i - max(2, ceil(i / 5)) for integer i
        let jitter = LB_INTERVAL_JITTER_FLOOR_SECS
            .max(interval.div_ceil(LB_INTERVAL_JITTER_DIVISOR));
        interval.saturating_sub(jitter)
    }

    /// Shortest time, from task ready, in which the LB could mark it unhealthy.
    ///
    /// The first failing probe lands at time zero and counts toward the
    /// threshold; the rest follow at the effective interval.
    pub fn earliest_lb_unhealthy_bound(&self) -> u64 {
        u64::from(self.num_checks_lb.saturating_sub(1)) * u64::from(self.effective_lb_interval())
    }

    /// Longest spacing between orchestrator probes.
    ///
    /// The nominal interval starts only after the previous probe finishes, and
    /// the probe harness allows one second beyond the HTTP timeout.
    pub fn actual_orchestrator_interval(&self) -> u64 {
        u64::from(self.timeout)
            + u64::from(PROBE_HARNESS_SLACK_SECS)
            + u64::from(self.check_interval_orchestrator)
    }

    /// Longest time, from container start, the orchestrator could take to mark
    /// the task unhealthy. Saturates at `u64::MAX`.
    pub fn latest_orchestrator_unhealthy_bound(&self) -> u64 {
        let cycle = self.actual_orchestrator_interval();

        // Failures inside the start period are not counted.
        let mut max_time = u64::from(self.max_container_startup);

        // Probing runs independently of container startup, so the first
        // counted probe can come up to one full cycle after the start period.
        max_time = max_time.saturating_add(cycle);

        // Then the remaining consecutive failures.
        let remaining = u64::from(self.num_checks_orchestrator.saturating_sub(1));
        max_time = max_time.saturating_add(remaining.saturating_mul(cycle));

        max_time
    }

    pub fn bounds(&self) -> TimingBounds {
        let earliest_lb_unhealthy = self.earliest_lb_unhealthy_bound();
        let latest_orchestrator_unhealthy = self.latest_orchestrator_unhealthy_bound();
        let slack = i128::from(earliest_lb_unhealthy) + i128::from(RACE_MARGIN_SECS)
            - i128::from(latest_orchestrator_unhealthy);

        TimingBounds {
            effective_lb_interval: self.effective_lb_interval(),
            actual_orchestrator_interval: self.actual_orchestrator_interval(),
            earliest_lb_unhealthy,
            latest_orchestrator_unhealthy,
            race_margin: RACE_MARGIN_SECS,
            slack: slack.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
        }
    }

    fn interval_for(&self, check: CheckKind) -> u32 {
        match check {
            CheckKind::Lb => self.check_interval_lb,
            CheckKind::Orchestrator => self.check_interval_orchestrator,
        }
    }

    fn threshold_for(&self, check: CheckKind) -> u32 {
        match check {
            CheckKind::Lb => self.num_checks_lb,
            CheckKind::Orchestrator => self.num_checks_orchestrator,
        }
    }

    pub(crate) fn check_threshold(&self, check: CheckKind) -> Result<(), TimingError> {
        if self.threshold_for(check) == 0 {
            return Err(TimingError::ZeroThreshold { check });
        }
        Ok(())
    }

    /// A probe must finish before the next nominal probe could start.
    pub(crate) fn check_timeout(&self, check: CheckKind) -> Result<(), TimingError> {
        let interval = self.interval_for(check);
        if self.timeout >= interval {
            return Err(TimingError::TimeoutExceedsInterval {
                check,
                timeout: self.timeout,
                interval,
            });
        }
        Ok(())
    }

    pub(crate) fn check_race(&self) -> Result<(), TimingError> {
        let earliest_lb = self.earliest_lb_unhealthy_bound();
        let latest_orchestrator = self.latest_orchestrator_unhealthy_bound();
        if earliest_lb.saturating_add(RACE_MARGIN_SECS) < latest_orchestrator {
            return Err(TimingError::RaceConditionRisk {
                earliest_lb,
                latest_orchestrator,
                margin: RACE_MARGIN_SECS,
            });
        }
        Ok(())
    }

    pub(crate) fn check_grace_period(&self) -> Result<(), TimingError> {
        let earliest_lb = self.earliest_lb_unhealthy_bound();
        if earliest_lb < u64::from(SERVICE_GRACE_PERIOD_SECS) {
            return Err(TimingError::GracePeriodTooLong {
                grace_period: SERVICE_GRACE_PERIOD_SECS,
                earliest_lb,
            });
        }
        Ok(())
    }
}
