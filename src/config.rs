//! Executor configuration

use ledger_executor_shared::limits;
use std::path::PathBuf;

/// Environment variable that overrides the work directory
pub const WORK_DIR_ENV: &str = "LEDGER_EXECUTOR_WORK_DIR";

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Directory that file-creating handlers write into
    pub work_dir: PathBuf,
    /// Fixed file name used by `createFile`
    pub created_file_name: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            created_file_name: limits::CREATED_FILE_NAME.into(),
        }
    }
}

impl ExecutorConfig {
    /// Default configuration with the work dir taken from the environment if set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(WORK_DIR_ENV) {
            config.work_dir = PathBuf::from(dir);
        }
        config
    }

    /// Full path of the file `createFile` produces
    pub fn created_file_path(&self) -> PathBuf {
        self.work_dir.join(&self.created_file_name)
    }
}
