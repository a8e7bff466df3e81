//! Configuration loader: .env file, config.toml, then env var overrides.

use common::config::{SlipConfig, MAX_INTERVAL_MINUTES};
use common::Error;
use std::path::Path;

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered != "0" && lowered != "false" && lowered != "no" && lowered != "off"
}

fn is_http_url(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

fn validate_config(config: &SlipConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.source.url.trim().is_empty() {
        issues.push("source.url is required".into());
    } else if !is_http_url(&config.source.url) {
        issues.push("source.url must be an http(s) URL".into());
    }

    if config.target.base_url.trim().is_empty() {
        issues.push("target.base_url is required".into());
    } else if !is_http_url(&config.target.base_url) {
        issues.push("target.base_url must be an http(s) URL".into());
    }
    if config.target.query_param.trim().is_empty() {
        issues.push("target.query_param must not be empty".into());
    }

    if !config.filters.min_edge_percent.is_finite() {
        issues.push("filters.min_edge_percent must be a finite number".into());
    }
    if config.filters.max_legs == 0 {
        issues.push("filters.max_legs must be > 0".into());
    }

    if config.schedule.enabled
        && !(1..=MAX_INTERVAL_MINUTES).contains(&config.schedule.interval_minutes)
    {
        issues.push(format!(
            "schedule.interval_minutes must be between 1 and {}",
            MAX_INTERVAL_MINUTES
        ));
    }

    if config.notify.enabled {
        if config.notify.bot_token.trim().is_empty() {
            issues.push(
                "TELEGRAM_BOT_TOKEN (notify.bot_token) is required when notifications are enabled"
                    .into(),
            );
        }
        if config.notify.chat_id.trim().is_empty() {
            issues.push(
                "TELEGRAM_CHAT_ID (notify.chat_id) is required when notifications are enabled"
                    .into(),
            );
        }
    }

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
        issues.push("logging.level must be one of: trace, debug, info, warn, error".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply environment overrides (highest priority). `lookup` is
/// `std::env::var` in production.
fn apply_env_overrides(config: &mut SlipConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup("TELEGRAM_BOT_TOKEN") {
        config.notify.bot_token = token;
    }
    if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID") {
        config.notify.chat_id = chat_id;
    }
    if let Some(email) = lookup("ODDSJAM_EMAIL") {
        config.source.email = email;
    }
    if let Some(password) = lookup("ODDSJAM_PASSWORD") {
        config.source.password = password;
    }
    if let Some(raw) = lookup("SLIP_NOTIFY_ENABLED") {
        config.notify.enabled = parse_bool(&raw);
    }
    if let Some(raw) = lookup("SLIP_SCHEDULE_ENABLED") {
        config.schedule.enabled = parse_bool(&raw);
    }
}

fn parse_config(contents: &str, origin: &Path) -> Result<SlipConfig, Error> {
    toml::from_str(contents)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", origin.display(), e)))
}

/// Load configuration from `.env`, the config file and the environment,
/// then validate it. Any missing required key fails here, before a cycle runs.
pub fn load_config(config_path: &Path) -> Result<SlipConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults, then the config file if it exists.
    let mut config = SlipConfig::default();
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", config_path.display(), e))
        })?;
        config = parse_config(&contents, config_path)?;
    }

    // 3. Environment overrides.
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    // 4. Validate.
    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FULL: &str = r#"
        [source]
        url = "https://oddsjam.com/betting-tools/positive-ev"

        [target]
        base_url = "https://app.prizepicks.com/board?projections="

        [filters]
        min_edge_percent = 4.5
        leagues = ["NBA", "NFL"]
        max_legs = 5

        [schedule]
        enabled = false
        interval_minutes = 2

        [notify]
        bot_token = "123:abc"
        chat_id = "-100"
    "#;

    fn parse(contents: &str) -> SlipConfig {
        parse_config(contents, Path::new("config.toml")).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_full_config_parses_and_validates() {
        let config = parse(FULL);
        assert_eq!(config.filters.min_edge_percent, 4.5);
        assert_eq!(config.filters.leagues, vec!["NBA", "NFL"]);
        assert_eq!(config.filters.max_legs, 5);
        assert!(!config.schedule.enabled);
        assert_eq!(config.schedule.interval_minutes, 2);
        assert_eq!(config.target.query_param, "projections");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(
            r#"
            [source]
            url = "https://oddsjam.com/ev"
            [target]
            base_url = "https://app.prizepicks.com/board?projections="
            [notify]
            enabled = false
        "#,
        );
        assert_eq!(config.filters.min_edge_percent, 5.0);
        assert!(config.filters.leagues.is_empty());
        assert_eq!(config.filters.max_legs, 3);
        assert!(config.schedule.enabled);
        assert_eq!(config.schedule.interval_minutes, 1);
        assert_eq!(config.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_camel_case_keys_accepted() {
        let config = parse(
            r#"
            [source]
            url = "https://oddsjam.com/ev"
            [target]
            baseUrl = "https://app.prizepicks.com/board?projections="
            [filters]
            minEdgePercent = 7.0
            maxLegs = 2
            [schedule]
            intervalMinutes = 3
        "#,
        );
        assert_eq!(config.target.base_url, "https://app.prizepicks.com/board?projections=");
        assert_eq!(config.filters.min_edge_percent, 7.0);
        assert_eq!(config.filters.max_legs, 2);
        assert_eq!(config.schedule.interval_minutes, 3);
    }

    #[test]
    fn test_missing_required_keys_reported_together() {
        let err = validate_config(&SlipConfig::default()).unwrap_err().to_string();
        assert!(err.contains("source.url is required"));
        assert!(err.contains("target.base_url is required"));
        assert!(err.contains("TELEGRAM_BOT_TOKEN"));
        assert!(err.contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn test_addressing_not_required_when_notify_disabled() {
        let mut config = parse(FULL);
        config.notify.enabled = false;
        config.notify.bot_token.clear();
        config.notify.chat_id.clear();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let mut config = parse(FULL);
        config.filters.max_legs = 0;
        config.schedule.enabled = true;
        config.schedule.interval_minutes = 0;
        config.logging.level = "loud".into();
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("filters.max_legs"));
        assert!(err.contains("schedule.interval_minutes"));
        assert!(err.contains("logging.level"));
    }

    #[test]
    fn test_interval_upper_bound() {
        let mut config = parse(FULL);
        config.schedule.enabled = true;

        config.schedule.interval_minutes = MAX_INTERVAL_MINUTES;
        assert!(validate_config(&config).is_ok());

        config.schedule.interval_minutes = MAX_INTERVAL_MINUTES + 1;
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("schedule.interval_minutes"));

        config.schedule.interval_minutes = u64::MAX;
        assert!(validate_config(&config).is_err());

        // Not checked when the schedule is off.
        config.schedule.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TELEGRAM_BOT_TOKEN", "999:zzz"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("ODDSJAM_EMAIL", "me@example.com"),
            ("SLIP_SCHEDULE_ENABLED", "off"),
        ]);
        let mut config = parse(FULL);
        config.schedule.enabled = true;
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.notify.bot_token, "999:zzz");
        assert_eq!(config.notify.chat_id, "42");
        assert_eq!(config.source.email, "me@example.com");
        assert!(!config.schedule.enabled);
        assert!(config.notify.enabled);

        let before = parse(FULL);
        let mut after = parse(FULL);
        apply_env_overrides(&mut after, no_env);
        assert_eq!(before.notify.bot_token, after.notify.bot_token);
    }

    #[test]
    fn test_parse_error_mentions_file() {
        let err = parse_config("[filters]\nmax_legs = \"three\"", Path::new("slips.toml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("slips.toml"));
    }
}
