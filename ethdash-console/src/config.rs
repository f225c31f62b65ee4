use std::path::PathBuf;
use std::time::Duration;
use ethdash_shared::models::errors::ConfigError;
use ethdash_shared::utilities::config::{get_env_var, DashConfig};

pub const DEFAULT_GAS_REFRESH_SECS: u64 = 15;
pub const DEFAULT_TOKEN_REFRESH_SECS: u64 = 60;
pub const DEFAULT_CAPTURE_PATH: &str = "dashboard-capture.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Automation,
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub dash: DashConfig,
    pub mode: Mode,
    pub wallet_address: Option<String>,
    pub gas_refresh: Duration,
    pub token_refresh: Duration,
    pub capture_path: PathBuf,
}

fn seconds(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match get_env_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or(ConfigError::InvalidValue { key: key.to_string(), value: raw }),
        None => Ok(Duration::from_secs(default)),
    }
}

pub fn parse_mode(raw: Option<&str>) -> Result<Mode, ConfigError> {
    match raw.map(|m| m.trim().to_lowercase()).as_deref() {
        None | Some("live") => Ok(Mode::Live),
        Some("automation") => Ok(Mode::Automation),
        Some(other) => Err(ConfigError::InvalidValue {
            key: "DASH_MODE".to_string(),
            value: other.to_string(),
        }),
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dash: DashConfig::from_env()?,
            mode: parse_mode(get_env_var("DASH_MODE").as_deref())?,
            wallet_address: get_env_var("DASH_WALLET_ADDRESS"),
            gas_refresh: seconds("DASH_GAS_REFRESH_SECS", DEFAULT_GAS_REFRESH_SECS)?,
            token_refresh: seconds("DASH_TOKEN_REFRESH_SECS", DEFAULT_TOKEN_REFRESH_SECS)?,
            capture_path: get_env_var("DASH_CAPTURE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CAPTURE_PATH)),
        })
    }
}
