use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dingtalk: DingTalkConfig,
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            dingtalk: DingTalkConfig::from_env(),
            schedule: ScheduleConfig::from_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("ONCALL_HOST", "0.0.0.0"),
            port: env_u16("ONCALL_PORT", 5008),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DingTalkConfig {
    /// Robot webhook URL. Empty disables outbound delivery.
    pub webhook_url: String,
    /// Optional signing secret (adds timestamp/sign query params).
    pub secret: Option<String>,
    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl DingTalkConfig {
    fn from_env() -> Self {
        Self {
            webhook_url: env_or("DINGTALK_WEBHOOK", ""),
            secret: env_opt("DINGTALK_SECRET"),
            timeout_secs: env_u64("DINGTALK_TIMEOUT_SECS", 5),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Persisted rotation table (CSV).
    pub table_file: PathBuf,
    /// Roster TOML file.
    pub roster_file: PathBuf,
    /// Download link embedded in the regeneration notice.
    pub download_url: String,
    /// Cron for the morning bug-assignment announcement.
    pub morning_cron: String,
    /// Cron for the end-of-day combined announcement.
    pub evening_cron: String,
}

impl ScheduleConfig {
    fn from_env() -> Self {
        Self {
            table_file: PathBuf::from(env_or("ONCALL_TABLE_FILE", "data/duty_schedule.csv")),
            roster_file: PathBuf::from(env_or("ONCALL_ROSTER_FILE", "roster.toml")),
            download_url: env_or(
                "ONCALL_DOWNLOAD_URL",
                "http://localhost:5008/api/download_duty_schedule",
            ),
            morning_cron: env_or("ONCALL_MORNING_CRON", "30 8 * * *"),
            evening_cron: env_or("ONCALL_EVENING_CRON", "20 17 * * *"),
        }
    }
}
