//! Startup configuration.
//!
//! The harness takes no command-line arguments. Settings come from the
//! built-in defaults, optionally overridden by a `race.toml` file: either the
//! one named by `RACE_CONFIG`, or the first one found walking up from the
//! current directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{barrier::SpinPolicy, counter::IncrementStrategy, error::ConfigError};

pub const CONFIG_FILE_NAME: &str = "race.toml";
pub const CONFIG_ENV_VAR: &str = "RACE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaceConfig {
    /// Upper bound of the complex-mode sweep. Run time grows quickly with it.
    pub max_threads: usize,
    /// Trials per thread count in complex mode.
    pub experiments: usize,
    pub run_complex: bool,
    pub run_simple: bool,
    /// Counter access discipline: "plain" or "atomic".
    pub strategy: IncrementStrategy,
    /// Thread count used by simple mode. Complex mode moves it through the
    /// sweep and puts it back afterwards.
    pub thread_count: usize,
    /// Barrier waiting: "busy" or "yield".
    pub spin: SpinPolicy,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            max_threads: 10,
            experiments: 100,
            run_complex: true,
            run_simple: true,
            strategy: IncrementStrategy::PlainLoadAddStore,
            thread_count: 8,
            spin: SpinPolicy::Busy,
        }
    }
}

impl RaceConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Looks for `race.toml` in the current directory and its ancestors.
    pub fn discover_path() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Resolves the configuration for this process. Returns the path it was
    /// loaded from, if any.
    pub fn resolve() -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .or_else(Self::discover_path);

        match path {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_threads", self.max_threads),
            ("experiments", self.experiments),
            ("thread_count", self.thread_count),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        Ok(())
    }
}
