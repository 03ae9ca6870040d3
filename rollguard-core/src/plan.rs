//! All three derivations at once, reporting every violation

use serde::{Deserialize, Serialize};

use crate::error::{CheckKind, TimingError, ValidationErrors};
use crate::lb::{LbCheckConfig, LbCheckOptions};
use crate::orchestrator::OrchestratorCheckConfig;
use crate::service::ServiceGraceConfig;
use crate::timing::TimingConfig;

/// Validated health check configuration, ready to embed in an
/// infrastructure description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckPlan {
    pub lb: LbCheckConfig,
    pub orchestrator: OrchestratorCheckConfig,
    pub service: ServiceGraceConfig,
}

impl TimingConfig {
    /// Every violated invariant, LB first, then orchestrator, then service.
    pub fn violations(&self) -> Vec<TimingError> {
        let checks = [
            self.check_threshold(CheckKind::Lb),
            self.check_timeout(CheckKind::Lb),
            self.check_race(),
            self.check_threshold(CheckKind::Orchestrator),
            self.check_timeout(CheckKind::Orchestrator),
            self.check_grace_period(),
        ];

        let mut violations: Vec<TimingError> = Vec::new();
        for err in checks.into_iter().filter_map(|check| check.err()) {
            if !violations.contains(&err) {
                violations.push(err);
            }
        }
        violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// Derive all three configurations, or fail with every violation found.
    pub fn plan(
        &self,
        lb_options: &LbCheckOptions,
        command: Option<&str>,
    ) -> Result<HealthCheckPlan, ValidationErrors> {
        let violations = self.violations();
        if !violations.is_empty() {
            tracing::debug!(
                violations = violations.len(),
                "Health check timing has violations"
            );
            return Err(ValidationErrors(violations));
        }

        let single = |err: TimingError| ValidationErrors(vec![err]);
        Ok(HealthCheckPlan {
            lb: self.derive_lb_check(lb_options).map_err(single)?,
            orchestrator: self.derive_orchestrator_check(command).map_err(single)?,
            service: self.derive_service_grace_settings().map_err(single)?,
        })
    }
}
