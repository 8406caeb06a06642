use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::{ConfigPaths, LoggingConfig};

const LOG_BASENAME: &str = "deck-history";
const LOG_SUFFIX: &str = "log";

/// Where the rotating log files live, split the way `FileSpec` wants it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget {
    directory: PathBuf,
    basename: String,
    suffix: String,
}

impl LogTarget {
    /// A configured path wins; a bare file name lands in the logs directory.
    fn resolve(config: &LoggingConfig, paths: &ConfigPaths) -> Self {
        let Some(path) = config.path.as_deref().map(Path::new) else {
            return Self::default_in(&paths.logs_dir);
        };
        let directory = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => paths.logs_dir.clone(),
        };
        let basename = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(LOG_BASENAME)
            .to_string();
        let suffix = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(LOG_SUFFIX)
            .to_string();
        Self {
            directory,
            basename,
            suffix,
        }
    }

    fn default_in(logs_dir: &Path) -> Self {
        Self {
            directory: logs_dir.to_path_buf(),
            basename: LOG_BASENAME.to_string(),
            suffix: LOG_SUFFIX.to_string(),
        }
    }

    fn file_spec(&self) -> FileSpec {
        FileSpec::default()
            .directory(&self.directory)
            .basename(&self.basename)
            .suffix(&self.suffix)
    }
}

/// Starts file logging. Warnings and errors are echoed to stderr so a failed
/// snapshot write is visible at the prompt, not only in the log file.
pub fn init_logging(config: &LoggingConfig, paths: &ConfigPaths) -> anyhow::Result<LoggerHandle> {
    let target = LogTarget::resolve(config, paths);
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(target.file_spec())
        .duplicate_to_stderr(Duplicate::Warn)
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    log::debug!(
        "Logging to {} at level {}",
        target.directory.display(),
        config.level
    );
    Ok(handle)
}
