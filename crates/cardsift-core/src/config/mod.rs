mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::SiftError;
use defaults::*;

/// Environment variable that overrides `channel.telegram.api_token`.
pub const ENV_TELEGRAM_TOKEN: &str = "CARDSIFT_TELEGRAM_TOKEN";
/// Environment variable that overrides `target.bot`.
pub const ENV_TARGET_BOT: &str = "CARDSIFT_TARGET_BOT";

/// Top-level cardsift configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cardsift: GeneralConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub buttons: ButtonConfig,
    #[serde(default)]
    pub startup: StartupConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// The remote bot whose profile cards are filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Bot username. A leading `@` is tolerated.
    #[serde(default = "default_target_bot")]
    pub bot: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            bot: default_target_bot(),
        }
    }
}

impl TargetConfig {
    /// Username without `@`, lower-cased.
    pub fn username(&self) -> String {
        self.bot.trim().trim_start_matches('@').to_lowercase()
    }
}

/// How the include list has to match for a profile to be liked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeMode {
    /// At least one include keyword must appear.
    #[default]
    Any,
    /// Every include keyword must appear.
    All,
}

impl IncludeMode {
    /// Case-insensitive; anything other than `all` means `any`.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Any
        }
    }
}

impl<'de> Deserialize<'de> for IncludeMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Keyword rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Entries may themselves be `,`/`;`/newline delimited.
    #[serde(default)]
    pub include_keywords: Vec<String>,
    #[serde(default)]
    pub exclude_keywords: Vec<String>,
    #[serde(default)]
    pub include_mode: IncludeMode,
    /// Minimum normalized text length in characters. 0 disables the gate.
    #[serde(default = "default_min_text_len")]
    pub min_text_len: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
            include_mode: IncludeMode::default(),
            min_text_len: default_min_text_len(),
        }
    }
}

/// Button pressing behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Exact label of the like button. Empty = unset.
    #[serde(default)]
    pub like: String,
    #[serde(default)]
    pub skip: String,
    #[serde(default)]
    pub sleep: String,
    #[serde(default = "default_press_delay_ms")]
    pub press_delay_ms: u64,
    #[serde(default = "default_pending_ttl_secs")]
    pub pending_ttl_secs: u64,
    /// Send a numeric follow-up keystroke after each press.
    #[serde(default)]
    pub dup_numeric: bool,
    #[serde(default = "default_dup_delay_ms")]
    pub dup_delay_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            like: String::new(),
            skip: String::new(),
            sleep: String::new(),
            press_delay_ms: default_press_delay_ms(),
            pending_ttl_secs: default_pending_ttl_secs(),
            dup_numeric: false,
            dup_delay_ms: default_dup_delay_ms(),
        }
    }
}

impl ButtonConfig {
    pub fn press_delay(&self) -> Duration {
        Duration::from_millis(self.press_delay_ms)
    }

    pub fn pending_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_ttl_secs)
    }

    pub fn dup_delay(&self) -> Duration {
        Duration::from_millis(self.dup_delay_ms)
    }
}

/// Session kick-off sent to the target bot when the gateway starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    #[serde(default = "default_true")]
    pub auto_start: bool,
    /// Empty = skip this step.
    #[serde(default = "default_start_text")]
    pub start_text: String,
    /// Empty = skip this step.
    #[serde(default = "default_start_click_text")]
    pub start_click_text: String,
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            start_text: default_start_text(),
            start_click_text: default_start_click_text(),
            start_delay_ms: default_start_delay_ms(),
        }
    }
}

impl StartupConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// Transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelConfig {
    pub telegram: Option<TelegramConfig>,
}

/// Telegram transport config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_token: String,
    /// Root of a Bot-API-compatible HTTP endpoint.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Endpoint method that presses an inline button on behalf of the
    /// account. Plain Bot API servers do not provide it.
    #[serde(default = "default_callback_method")]
    pub callback_method: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_token: String::new(),
            api_base: default_api_base(),
            callback_method: default_callback_method(),
        }
    }
}

/// Decision storage config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Config {
    /// Apply environment overrides for secrets and the target bot.
    ///
    /// `lookup` is `std::env::var` in production.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_TELEGRAM_TOKEN).filter(|t| !t.trim().is_empty()) {
            let tg = self.channel.telegram.get_or_insert_with(|| TelegramConfig {
                enabled: true,
                ..Default::default()
            });
            tg.api_token = token.trim().to_string();
        }
        if let Some(bot) = lookup(ENV_TARGET_BOT).filter(|b| !b.trim().is_empty()) {
            self.target.bot = bot.trim().to_string();
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, SiftError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| SiftError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| SiftError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
