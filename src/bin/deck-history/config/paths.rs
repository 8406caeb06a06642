use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(config_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = default_data_dir()?;
        let logs_dir = data_dir.join("logs");
        let config_file = match config_override {
            Some(path) => path,
            None => default_config_dir()?.join("config.toml"),
        };
        Ok(Self {
            config_file,
            data_dir,
            logs_dir,
        })
    }
}

fn default_config_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("missing home directory for config paths")?;
    Ok(home.join(".config").join("deck-history"))
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().context("missing home directory for config paths")?;
    Ok(home.join(".local").join("share").join("deck-history"))
}
