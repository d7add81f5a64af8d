use std::path::{Path, PathBuf};

use crate::foundation::error::{ClipcheckError, ClipcheckResult};

/// Config file names probed (in order) in each directory by [`ValidationConfig::find_config_file`].
pub const CONFIG_FILE_NAMES: [&str; 3] = [".validation.toml", "validation.toml", ".pyproject.toml"];

/// Default number of uncached file candidates above which the file checker goes parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 5;

/// Knobs shared by the validators and the pipeline.
///
/// Values come from (lowest to highest precedence) [`Default`], the `[validation]` table of a TOML
/// file, `VALIDATION_*` environment variables, and finally whatever the caller sets directly.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Promote vocabulary, placeholder and missing-file warnings to errors.
    pub strict_mode: bool,
    /// Upper bound on file-check workers. `None` means `min(8, 2 * cpus)`.
    pub max_workers: Option<usize>,
    /// Uncached candidate count above which file checks run on the worker pool.
    pub parallel_threshold: usize,
    /// Skip the file existence checker entirely.
    pub skip_file_validation: bool,
    /// Keep per-path probe outcomes between validations of the same checker.
    pub enable_cache: bool,
    /// Print every result, including OK ones.
    pub verbose: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_workers: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            skip_file_validation: false,
            enable_cache: true,
            verbose: false,
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    #[serde(default)]
    validation: ValidationConfig,
}

impl ValidationConfig {
    /// Parse the `[validation]` table out of TOML text. A missing table yields the defaults.
    pub fn from_toml_str(text: &str) -> ClipcheckResult<Self> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e| ClipcheckError::config(format!("parse validation config: {e}")))?;
        file.validation.check()?;
        Ok(file.validation)
    }

    /// Load the `[validation]` table from a TOML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> ClipcheckResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClipcheckError::config(format!(
                "config file not found: '{}'",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            ClipcheckError::io(format!("read config file '{}': {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Walk from `start_dir` up to the filesystem root and return the first config file found.
    pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
        start_dir.as_ref().ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Apply `VALIDATION_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> ClipcheckResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `VALIDATION_*` overrides read through `lookup`.
    ///
    /// Booleans are `true` when the value equals `true` case-insensitively, matching how the
    /// variables are documented; integers must parse or the whole call fails.
    pub fn apply_overrides<F>(mut self, lookup: F) -> ClipcheckResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).map(|v| v.trim().eq_ignore_ascii_case("true"));
        let count = |key: &str| -> ClipcheckResult<Option<usize>> {
            lookup(key)
                .map(|v| {
                    v.trim().parse::<usize>().map_err(|e| {
                        ClipcheckError::config(format!(
                            "{key}: expected an integer, got '{v}': {e}"
                        ))
                    })
                })
                .transpose()
        };

        if let Some(v) = flag("VALIDATION_STRICT_MODE") {
            self.strict_mode = v;
        }
        if let Some(n) = count("VALIDATION_MAX_WORKERS")? {
            self.max_workers = Some(n);
        }
        if let Some(n) = count("VALIDATION_PARALLEL_THRESHOLD")? {
            self.parallel_threshold = n;
        }
        if let Some(v) = flag("VALIDATION_SKIP_FILE_VALIDATION") {
            self.skip_file_validation = v;
        }
        if let Some(v) = flag("VALIDATION_ENABLE_CACHE") {
            self.enable_cache = v;
        }
        if let Some(v) = flag("VALIDATION_VERBOSE") {
            self.verbose = v;
        }

        self.check()?;
        Ok(self)
    }

    /// Reject settings no checker can run with.
    pub fn check(&self) -> ClipcheckResult<()> {
        if self.max_workers == Some(0) {
            return Err(ClipcheckError::config("max_workers must be >= 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
