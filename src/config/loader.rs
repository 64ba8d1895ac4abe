//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MeteoConfig;
use crate::domain::errors::MeteoError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MeteoConfig
/// 4. Applies environment variable overrides (METEO_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use meteo::config::loader::load_config;
///
/// let config = load_config("meteo.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MeteoConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MeteoError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MeteoError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MeteoConfig = toml::from_str(&contents)
        .map_err(|e| MeteoError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MeteoError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left as they are.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MeteoError::Other(format!("invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    cap[0].to_string()
                }
            }
        });
        result.push_str(&processed);
    }

    if !missing_vars.is_empty() {
        return Err(MeteoError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using METEO_* prefix
///
/// Environment variables follow the pattern: METEO_<SECTION>_<KEY>
/// For example: METEO_WORKBOOK_PATH, METEO_RUN_CLOCK
fn apply_env_overrides(config: &mut MeteoConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("METEO_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("METEO_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Workbook overrides
    if let Ok(val) = std::env::var("METEO_WORKBOOK_PATH") {
        config.workbook.path = val;
    }
    if let Ok(val) = std::env::var("METEO_WORKBOOK_SHEET_NAME") {
        config.workbook.sheet_name = val;
    }
    if let Ok(val) = std::env::var("METEO_WORKBOOK_OUTPUT_PATH") {
        config.workbook.output_path = Some(val);
    }

    // Run overrides
    if let Ok(val) = std::env::var("METEO_RUN_CLOCK") {
        config.run.clock = val.parse()?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("METEO_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("METEO_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("METEO_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("METEO_LOADER_TEST_VAR", "planning.xlsx");
        let input = "path = \"${METEO_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"planning.xlsx\"");
        std::env::remove_var("METEO_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("METEO_LOADER_MISSING_VAR");
        let input = "path = \"${METEO_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("METEO_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("METEO_LOADER_COMMENTED");
        let input = "# path = \"${METEO_LOADER_COMMENTED}\"\nname = 1\n";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[workbook]
path = "reports/planning.xlsx"
output_path = "reports/planning-updated.xlsx"

[logging]
local_enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.workbook.path, "reports/planning.xlsx");
        assert_eq!(config.workbook.sheet_name, "Compte-rendu Météo");
        assert_eq!(
            config.workbook.output_path.as_deref(),
            Some("reports/planning-updated.xlsx")
        );
    }

    #[test]
    fn test_load_config_invalid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[workbook]\npath = \"planning.ods\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
