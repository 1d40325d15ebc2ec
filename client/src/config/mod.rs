mod client_config;

pub(crate) use odd_scoring_common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use client_config::{get_config_manager, Config};
