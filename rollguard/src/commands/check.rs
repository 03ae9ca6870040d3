use std::path::Path;

use crate::config::{ConfigError, RollguardToml};
use crate::output;
use crate::validation::{self, EnvReport};

pub fn run(config_path: &Path, env: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = RollguardToml::load_from_file(config_path)?;

    let reports = match env {
        Some(name) => vec![validation::validate_env(&config.resolve_env(name)?)],
        None => validation::validate_config(&config)?,
    };

    if let Some(name) = &config.service.name {
        output::muted(&format!("Service {}", name));
    }

    for report in &reports {
        print_report(report);
    }

    let failed: Vec<&str> = reports
        .iter()
        .filter(|r| !r.is_ok())
        .map(|r| r.env.as_str())
        .collect();

    if !failed.is_empty() {
        tracing::info!(failed = failed.len(), "Health check timing check failed");
        return Err(ConfigError::Validation(format!(
            "Health check timing is unsafe in: {}",
            failed.join(", ")
        ))
        .into());
    }

    println!();
    output::success("Orchestrator wins the race in every environment");
    Ok(())
}

fn print_report(report: &EnvReport) {
    let bounds = &report.bounds;

    output::section(&format!("Environment {}", report.env));
    if output::is_verbose() {
        output::detail(
            "LB probe interval (fastest)",
            format!("{}s", bounds.effective_lb_interval),
        );
        output::detail(
            "Orchestrator cycle (slowest)",
            format!("{}s", bounds.actual_orchestrator_interval),
        );
    }
    output::detail(
        "LB unhealthy no sooner than",
        format!("{}s", bounds.earliest_lb_unhealthy),
    );
    output::detail(
        "Orchestrator unhealthy by",
        format!("{}s", bounds.latest_orchestrator_unhealthy),
    );
    output::detail(
        "Slack",
        format!("{}s (margin {}s)", bounds.slack, bounds.race_margin),
    );

    if report.result.has_warnings() {
        for warning in &report.result.warnings {
            output::warning(warning);
        }
    }
    for violation in &report.violations {
        output::error(&format!(
            "[{}] {}",
            validation::violation_label(violation),
            violation
        ));
    }
    for error in &report.result.errors {
        output::error(error);
    }
    if report.is_ok() {
        output::success("Health check timing is consistent");
    }
}
