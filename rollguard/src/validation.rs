use rollguard_core::{CheckKind, TimingBounds, TimingError};

use crate::config::{ConfigError, ResolvedEnv, Result, RollguardToml};

/// Settings problems found outside the timing model, with warnings
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Settings that make the rendered checks unusable
    pub errors: Vec<String>,
    /// Settings that are legal but probably unintended
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error
    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Add a warning
    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert to Result, failing if there are errors
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.has_errors() {
            Err(ConfigError::Validation(self.errors.join("\n")))
        } else {
            Ok(self.warnings)
        }
    }
}

/// Timing and settings check for one environment
#[derive(Debug)]
pub struct EnvReport {
    pub env: String,
    pub bounds: TimingBounds,
    /// Timing invariants the environment breaks
    pub violations: Vec<TimingError>,
    /// Settings checks
    pub result: ValidationResult,
}

impl EnvReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty() && !self.result.has_errors()
    }
}

/// Which part of the deployment a timing violation is about
pub fn violation_label(violation: &TimingError) -> &'static str {
    match violation {
        TimingError::TimeoutExceedsInterval { check, .. } | TimingError::ZeroThreshold { check } => {
            match check {
                CheckKind::Lb => "lb",
                CheckKind::Orchestrator => "orchestrator",
            }
        }
        TimingError::RaceConditionRisk { .. } => "race",
        TimingError::GracePeriodTooLong { .. } => "service",
    }
}

/// Settings problems the timing model does not cover
pub fn validate_settings(env: &ResolvedEnv) -> ValidationResult {
    let mut result = ValidationResult::new();
    let timing = &env.timing;

    if !timing.endpoint_path.starts_with('/') {
        result.error(format!(
            "endpoint_path '{}' must be an absolute path",
            timing.endpoint_path
        ));
    }

    if timing.container_port == 0 {
        result.error("container_port cannot be 0");
    }

    if env.lb.port == Some(0) {
        result.error("lb_port cannot be 0");
    }

    if env
        .probe_command
        .as_deref()
        .is_some_and(|cmd| cmd.trim().is_empty())
    {
        result.warn("probe_command is empty; the default HTTP probe will be used");
    }

    if timing.timeout == 0 {
        result.warn("timeout is 0; every probe that does not answer instantly will fail");
    }

    result
}

/// Check one environment against the timing model and its own settings
pub fn validate_env(env: &ResolvedEnv) -> EnvReport {
    let violations = env.timing.violations();
    let result = validate_settings(env);

    tracing::debug!(
        env = %env.name,
        violations = violations.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validated environment"
    );

    EnvReport {
        env: env.name.clone(),
        bounds: env.timing.bounds(),
        violations,
        result,
    }
}

/// Check every environment in rollguard.toml
pub fn validate_config(config: &RollguardToml) -> Result<Vec<EnvReport>> {
    Ok(config.resolve_envs()?.iter().map(validate_env).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollguard_core::{LbCheckOptions, TimingConfig};

    fn env_with(timing: TimingConfig) -> ResolvedEnv {
        ResolvedEnv {
            name: "production".to_string(),
            timing,
            lb: LbCheckOptions::default(),
            probe_command: None,
        }
    }

    #[test]
    fn default_env_is_valid() {
        let report = validate_env(&env_with(TimingConfig::default()));
        assert!(report.is_ok());
        assert!(report.violations.is_empty());
        assert_eq!(report.bounds.earliest_lb_unhealthy, 96);
        assert!(!report.result.has_warnings());
    }

    #[test]
    fn timing_violations_are_kept_apart_from_settings_errors() {
        let report = validate_env(&env_with(TimingConfig {
            check_interval_lb: 10,
            num_checks_lb: 2,
            ..Default::default()
        }));
        assert!(!report.is_ok());
        assert!(!report.result.has_errors());

        let labels: Vec<&str> = report.violations.iter().map(violation_label).collect();
        assert_eq!(labels, vec!["race", "service"]);
        assert!(report.violations[0].to_string().contains("before the orchestrator"));
    }

    #[test]
    fn settings_errors_fail_the_report_without_violations() {
        let report = validate_env(&env_with(TimingConfig {
            container_port: 0,
            ..Default::default()
        }));
        assert!(report.violations.is_empty());
        assert!(!report.is_ok());
    }

    #[test]
    fn timeout_violations_are_labelled_by_check() {
        let report = validate_env(&env_with(TimingConfig {
            timeout: 31,
            ..Default::default()
        }));
        let labels: Vec<&str> = report.violations.iter().map(violation_label).collect();
        assert_eq!(labels, vec!["lb", "orchestrator"]);
    }

    #[test]
    fn relative_endpoint_path_is_rejected() {
        let result = validate_settings(&env_with(TimingConfig {
            endpoint_path: "healthz".to_string(),
            ..Default::default()
        }));
        assert!(
            result
                .errors
                .iter()
                .any(|e| e.contains("must be an absolute path"))
        );
    }

    #[test]
    fn empty_probe_command_is_a_warning() {
        let mut env = env_with(TimingConfig::default());
        env.probe_command = Some(" ".to_string());
        let result = validate_settings(&env);
        assert!(!result.has_errors());
        assert!(result.has_warnings());
    }

    #[test]
    fn into_result_joins_errors() {
        let mut result = ValidationResult::new();
        result.error("first");
        result.error("second");
        let err = result.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: first\nsecond");
    }

    #[test]
    fn validate_config_covers_every_env() {
        let config = RollguardToml::parse(
            r#"
[envs.staging]
num_checks_lb = 1

[envs.production]
"#,
        )
        .unwrap();
        let reports = validate_config(&config).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].env, "production");
        assert!(reports[0].is_ok());
        assert_eq!(reports[1].env, "staging");
        assert!(!reports[1].is_ok());
    }
}
