//! Slip generator configuration types.

use serde::{Deserialize, Serialize};

/// Top-level configuration, read once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlipConfig {
    /// Page that lists the props.
    #[serde(default)]
    pub source: SourceConfig,

    /// Wager-builder the deep-link points at.
    #[serde(default)]
    pub target: TargetConfig,

    /// Selection criteria.
    #[serde(default)]
    pub filters: FilterConfig,

    /// Run cadence.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Chat notification settings.
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The scraped odds page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Dashboard URL to scrape. Required.
    #[serde(default)]
    pub url: String,

    /// Log in before every fetch.
    #[serde(default, alias = "loginRequired")]
    pub login_required: bool,

    #[serde(default = "default_login_url", alias = "loginUrl")]
    pub login_url: String,

    /// Login email (usually from `ODDSJAM_EMAIL`).
    #[serde(default)]
    pub email: String,

    /// Login password (usually from `ODDSJAM_PASSWORD`).
    #[serde(default)]
    pub password: String,
}

/// The deep-link target site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Prefix the joined tokens are appended to. Required.
    #[serde(default, alias = "baseUrl")]
    pub base_url: String,

    /// Query parameter on outbound links that carries `<id>-<side>-<line>`.
    #[serde(default = "default_query_param", alias = "queryParam")]
    pub query_param: String,
}

/// Shortlist policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Props with a lower edge are dropped.
    #[serde(default = "default_min_edge", alias = "minEdgePercent")]
    pub min_edge_percent: f64,

    /// League allow-list. Empty means every league.
    #[serde(default)]
    pub leagues: Vec<String>,

    /// Maximum number of legs on one slip.
    #[serde(default = "default_max_legs", alias = "maxLegs")]
    pub max_legs: usize,
}

/// Longest accepted cycle interval: one week.
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// When false, run one cycle and exit.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_interval_minutes", alias = "intervalMinutes")]
    pub interval_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Telegram bot token (usually from `TELEGRAM_BOT_TOKEN`).
    #[serde(default, alias = "botToken")]
    pub bot_token: String,

    /// Destination chat (usually from `TELEGRAM_CHAT_ID`).
    #[serde(default, alias = "chatId")]
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file appended next to stderr output. Empty disables it.
    #[serde(default = "default_log_file")]
    pub file: String,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_login_url() -> String {
    "https://app.oddsjam.com/login".into()
}

fn default_query_param() -> String {
    "projections".into()
}

fn default_min_edge() -> f64 {
    5.0
}
fn default_max_legs() -> usize {
    3
}

fn default_interval_minutes() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_file() -> String {
    "slip_generator.log".into()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            login_required: false,
            login_url: default_login_url(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            query_param: default_query_param(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_edge_percent: default_min_edge(),
            leagues: Vec::new(),
            max_legs: default_max_legs(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_minutes: default_interval_minutes(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            bot_token: String::new(),
            chat_id: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}
