mod paths;
mod types;

use std::fs;

use deck_history::HistoryConfig;

pub use paths::ConfigPaths;
pub use types::LoggingConfig;
use types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
}

pub fn load_config(path_override: Option<std::path::PathBuf>) -> anyhow::Result<LoadedConfig> {
    let paths = ConfigPaths::resolve(path_override)?;
    fs::create_dir_all(&paths.data_dir)?;
    fs::create_dir_all(&paths.logs_dir)?;
    let config = match fs::read_to_string(&paths.config_file) {
        Ok(contents) => toml::from_str(&contents)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(err) => return Err(err.into()),
    };
    Ok(LoadedConfig { config, paths })
}

impl LoadedConfig {
    /// History settings with the log path defaulted into the data directory.
    pub fn history(&self) -> HistoryConfig {
        let mut history = self.config.history.clone();
        if history.log_path.is_none() {
            history.log_path = Some(self.paths.data_dir.join("history.json"));
        }
        history
    }
}
