use std::fs;
use std::path::Path;

use crate::config::{ConfigError, starter_config};
use crate::output;

pub fn run(
    config_path: &Path,
    force: bool,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() && !force {
        return Err(ConfigError::Validation(format!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let name = match name {
        Some(name) => name,
        None => default_service_name(config_path)?,
    };

    fs::write(config_path, starter_config(&name))
        .map_err(|e| ConfigError::FileWrite(config_path.to_path_buf(), e))?;

    tracing::info!(path = %config_path.display(), service = %name, "Wrote starter configuration");
    output::success(&format!("Created {}", config_path.display()));
    output::muted("Run 'rollguard check' to validate the health check timing.");
    Ok(())
}

/// Name of the directory the config file lives in
fn default_service_name(config_path: &Path) -> Result<String, std::io::Error> {
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.canonicalize()?,
        _ => std::env::current_dir()?,
    };

    Ok(dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("service")
        .to_string())
}
