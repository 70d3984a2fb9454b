use std::path::PathBuf;

use crate::app_config::{AppConfig, CliConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load the settings used by the command-line tool.
///
/// Server-only variables (`RINGMAP_BIND_ADDR`, `RINGMAP_RATE_LIMIT_PER_MINUTE`,
/// `RINGMAP_ENV`) are not read, so a bad value there cannot break the CLI.
/// Loads `.env` first, like [`load_app_config`].
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_cli_config() -> Result<CliConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_cli_config(|key| std::env::var(key))
}

fn build_cli_config<F>(lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("RINGMAP_LOG_LEVEL", "info");
    let sites_path = PathBuf::from(or_default("RINGMAP_SITES_PATH", "./config/sites.yaml"));
    let ring_radii_m = parse_radii(&or_default("RINGMAP_RING_RADII_M", "5000,10000,15000"))
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "RINGMAP_RING_RADII_M".to_string(),
            reason,
        })?;

    Ok(CliConfig {
        log_level,
        sites_path,
        ring_radii_m,
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("RINGMAP_ENV", "development"))?;

    let bind_addr = or_default("RINGMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("RINGMAP_BIND_ADDR", e.to_string()))?;

    let CliConfig {
        log_level,
        sites_path,
        ring_radii_m,
    } = build_cli_config(&lookup)?;

    let rate_limit_per_minute = or_default("RINGMAP_RATE_LIMIT_PER_MINUTE", "120")
        .parse::<usize>()
        .map_err(|e| invalid("RINGMAP_RATE_LIMIT_PER_MINUTE", e.to_string()))?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "RINGMAP_RATE_LIMIT_PER_MINUTE",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sites_path,
        ring_radii_m,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RINGMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parse a comma-separated list of ascending ring radii in meters.
///
/// Also used by the CLI `--radii` flag.
///
/// # Errors
///
/// Returns a human-readable reason when the list is empty, contains a
/// non-number, or is not strictly ascending and positive.
pub fn parse_radii(raw: &str) -> Result<Vec<f64>, String> {
    let radii = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| format!("'{s}' is not a number"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if radii.is_empty() {
        return Err("at least one radius is required".to_string());
    }
    let mut previous = 0.0;
    for &radius in &radii {
        if !radius.is_finite() || radius <= previous {
            return Err(format!(
                "radii must be positive and strictly ascending; got {radius} after {previous}"
            ));
        }
        previous = radius;
    }
    Ok(radii)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
