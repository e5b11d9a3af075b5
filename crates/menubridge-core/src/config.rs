use crate::app_config::{AppConfig, CacheSettings, Environment, SquareEnvironment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::time::Duration;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("MENUBRIDGE_ENV", "development"));

    let mut bind_addr = or_default("MENUBRIDGE_BIND_ADDR", "0.0.0.0:4000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("MENUBRIDGE_BIND_ADDR", e.to_string()))?;
    if let Ok(port) = lookup("PORT") {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|e| invalid("PORT", e.to_string()))?;
        bind_addr.set_port(port);
    }

    let log_level = or_default("MENUBRIDGE_LOG_LEVEL", "info");

    let square_access_token = lookup("SQUARE_ACCESS_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let square_environment =
        parse_square_environment(&or_default("SQUARE_ENVIRONMENT", "sandbox"))?;
    let square_timeout_secs = parse_u64("MENUBRIDGE_SQUARE_TIMEOUT_SECS", "30")?;
    if square_timeout_secs == 0 {
        return Err(invalid(
            "MENUBRIDGE_SQUARE_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let defaults = CacheSettings::default();
    let ttl_secs = parse_u64("CACHE_TTL_SECONDS", &defaults.ttl.as_secs().to_string())?;
    let max_entries = parse_u64("CACHE_MAX_ENTRIES", &defaults.max_entries.to_string())?;
    if max_entries == 0 {
        return Err(invalid(
            "CACHE_MAX_ENTRIES",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        square_access_token,
        square_environment,
        square_timeout_secs,
        cache: CacheSettings {
            max_entries,
            ttl: Duration::from_secs(ttl_secs),
        },
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_square_environment(s: &str) -> Result<SquareEnvironment, ConfigError> {
    match s.trim() {
        "sandbox" => Ok(SquareEnvironment::Sandbox),
        "production" => Ok(SquareEnvironment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SQUARE_ENVIRONMENT".to_string(),
            reason: format!("expected \"sandbox\" or \"production\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::time::Duration;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_uses_defaults_for_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:4000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.square_access_token.is_none());
        assert_eq!(cfg.square_environment, SquareEnvironment::Sandbox);
        assert_eq!(cfg.square_timeout_secs, 30);
        assert_eq!(cfg.cache.max_entries, 500);
        assert_eq!(cfg.cache.ttl, Duration::from_secs(120));
    }

    #[test]
    fn build_app_config_reads_square_settings() {
        let mut map = HashMap::new();
        map.insert("SQUARE_ACCESS_TOKEN", "EAAA-token");
        map.insert("SQUARE_ENVIRONMENT", "production");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.square_access_token.as_deref(), Some("EAAA-token"));
        assert_eq!(cfg.square_environment, SquareEnvironment::Production);
    }

    #[test]
    fn build_app_config_treats_blank_token_as_missing() {
        let mut map = HashMap::new();
        map.insert("SQUARE_ACCESS_TOKEN", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.square_access_token.is_none());
    }

    #[test]
    fn build_app_config_rejects_unknown_square_environment() {
        let mut map = HashMap::new();
        map.insert("SQUARE_ENVIRONMENT", "staging");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SQUARE_ENVIRONMENT"),
            "expected InvalidEnvVar(SQUARE_ENVIRONMENT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_port_overrides_bind_addr_port() {
        let mut map = HashMap::new();
        map.insert("MENUBRIDGE_BIND_ADDR", "127.0.0.1:3000");
        map.insert("PORT", "8080");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("MENUBRIDGE_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MENUBRIDGE_BIND_ADDR"),
            "expected InvalidEnvVar(MENUBRIDGE_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_reads_cache_overrides() {
        let mut map = HashMap::new();
        map.insert("CACHE_TTL_SECONDS", "5");
        map.insert("CACHE_MAX_ENTRIES", "10");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.cache.ttl, Duration::from_secs(5));
        assert_eq!(cfg.cache.max_entries, 10);
    }

    #[test]
    fn build_app_config_rejects_non_numeric_ttl() {
        let mut map = HashMap::new();
        map.insert("CACHE_TTL_SECONDS", "two minutes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CACHE_TTL_SECONDS"),
            "expected InvalidEnvVar(CACHE_TTL_SECONDS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_cache_capacity() {
        let mut map = HashMap::new();
        map.insert("CACHE_MAX_ENTRIES", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CACHE_MAX_ENTRIES"),
            "expected InvalidEnvVar(CACHE_MAX_ENTRIES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_square_timeout() {
        let mut map = HashMap::new();
        map.insert("MENUBRIDGE_SQUARE_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MENUBRIDGE_SQUARE_TIMEOUT_SECS"),
            "expected InvalidEnvVar(MENUBRIDGE_SQUARE_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
