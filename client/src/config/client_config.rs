use odd_scoring_common::config::Validate;
use odd_scoring_common::games::odd_scoring::GameMode;
use serde::{Deserialize, Serialize};

use super::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "odd_scoring_client_config.yaml";
const DEFAULT_SNAPSHOT_PATH: &str = "odd_scoring_snapshot.yaml";

pub const MIN_BOT_DELAY_MS: u64 = 100;
pub const MAX_BOT_DELAY_MS: u64 = 10_000;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

/// Manager for the client config, next to the executable unless `path` overrides it.
pub fn get_config_manager(path: Option<&str>) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub nickname: Option<String>,
    pub bot_delay_ms: u64,
    pub default_mode: GameMode,
    pub snapshot_path: String,
    pub use_log_prefix: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_BOT_DELAY_MS..=MAX_BOT_DELAY_MS).contains(&self.bot_delay_ms) {
            return Err(format!(
                "bot_delay_ms must be between {} and {}, got {}",
                MIN_BOT_DELAY_MS, MAX_BOT_DELAY_MS, self.bot_delay_ms
            ));
        }
        if self.default_mode == GameMode::Networked {
            return Err("default_mode must be VsBot or VsLocalPlayer".to_string());
        }
        if self.snapshot_path.trim().is_empty() {
            return Err("snapshot_path must not be empty".to_string());
        }
        if let Some(nickname) = &self.nickname
            && nickname.trim().is_empty()
        {
            return Err("nickname must not be blank".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nickname: None,
            bot_delay_ms: 1000,
            default_mode: GameMode::VsBot,
            snapshot_path: DEFAULT_SNAPSHOT_PATH.to_string(),
            use_log_prefix: false,
        }
    }
}
