use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

use rayon::prelude::*;

use crate::document::path::FieldPath;
use crate::document::shape::Normalized;
use crate::document::value::{Value, Visitor, walk};
use crate::foundation::config::{DEFAULT_PARALLEL_THRESHOLD, ValidationConfig};
use crate::foundation::error::{ClipcheckError, ClipcheckResult};
use crate::report::model::{ValidationReport, ValidationResult};
use crate::rules::{self, messages};
use crate::validate::Validator;

/// Directory probed when a relative path is missing under the base directory.
pub const CONTENT_DIR_NAME: &str = "Content";

/// What a single filesystem probe found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Missing,
    /// The probe itself failed, e.g. permission denied on a parent directory.
    Inaccessible(String),
}

/// Probe outcome for one declared `src`, with the path that was actually checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Probe {
    pub resolved: PathBuf,
    pub outcome: Outcome,
}

/// Checks that every local media file referenced by a `src` exists.
///
/// Relative paths resolve against the directory of `script_path` (or the current directory),
/// falling back to its `Content/` subdirectory. URLs are skipped. Probe outcomes are cached per
/// declared string until [`FileChecker::clear_cache`].
#[derive(Debug)]
pub struct FileChecker {
    strict_mode: bool,
    script_path: Option<PathBuf>,
    max_workers: usize,
    parallel_threshold: usize,
    enable_cache: bool,
    base_dir: OnceLock<PathBuf>,
    content_dir: OnceLock<Option<PathBuf>>,
    cache: RwLock<HashMap<String, Probe>>,
    probes: AtomicUsize,
}

impl Default for FileChecker {
    fn default() -> Self {
        Self::new(false)
    }
}

impl FileChecker {
    pub fn new(strict_mode: bool) -> Self {
        Self {
            strict_mode,
            script_path: None,
            max_workers: default_max_workers(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            enable_cache: true,
            base_dir: OnceLock::new(),
            content_dir: OnceLock::new(),
            cache: RwLock::new(HashMap::new()),
            probes: AtomicUsize::new(0),
        }
    }

    /// Build a checker from shared settings. `script_path` anchors relative media paths.
    pub fn from_config(
        config: &ValidationConfig,
        script_path: Option<PathBuf>,
    ) -> ClipcheckResult<Self> {
        config.check()?;
        let mut checker = Self::new(config.strict_mode)
            .with_parallel_threshold(config.parallel_threshold)
            .with_cache(config.enable_cache);
        if let Some(n) = config.max_workers {
            checker = checker.with_max_workers(n)?;
        }
        if let Some(path) = script_path {
            checker = checker.with_script_path(path);
        }
        Ok(checker)
    }

    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self.base_dir = OnceLock::new();
        self.content_dir = OnceLock::new();
        self
    }

    pub fn with_max_workers(mut self, n: usize) -> ClipcheckResult<Self> {
        if n == 0 {
            return Err(ClipcheckError::config("max_workers must be >= 1"));
        }
        self.max_workers = n;
        Ok(self)
    }

    pub fn with_parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n;
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.enable_cache = enabled;
        self
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Drop every cached probe outcome.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn cached_entries(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Filesystem probes performed since construction.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }

    /// Directory relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.base_dir.get_or_init(|| {
            let from_script = self.script_path.as_deref().map(|p| {
                if p.is_dir() {
                    p.to_path_buf()
                } else {
                    p.parent()
                        .filter(|parent| !parent.as_os_str().is_empty())
                        .map(Path::to_path_buf)
                        .unwrap_or_else(current_dir)
                }
            });
            from_script.unwrap_or_else(current_dir)
        })
    }

    fn content_dir(&self) -> Option<&Path> {
        self.content_dir
            .get_or_init(|| {
                let dir = self.base_dir().join(CONTENT_DIR_NAME);
                dir.is_dir().then_some(dir)
            })
            .as_deref()
    }

    /// Path a declared `src` is checked at.
    pub fn resolve(&self, declared: &str) -> PathBuf {
        let target = rules::sole_placeholder(declared)
            .map(str::trim)
            .unwrap_or(declared);
        let path = Path::new(target);
        let chosen = if path.is_absolute() {
            path.to_path_buf()
        } else {
            let primary = self.base_dir().join(path);
            match primary.try_exists() {
                Ok(false) => self
                    .content_dir()
                    .map(|dir| dir.join(path))
                    .filter(|alt| matches!(alt.try_exists(), Ok(true)))
                    .unwrap_or(primary),
                _ => primary,
            }
        };
        std::path::absolute(&chosen).unwrap_or(chosen)
    }

    fn probe(&self, declared: &str) -> Probe {
        let resolved = self.resolve(declared);
        self.probes.fetch_add(1, Ordering::Relaxed);
        let outcome = match resolved.try_exists() {
            Ok(true) => Outcome::Found,
            Ok(false) => Outcome::Missing,
            Err(e) => Outcome::Inaccessible(e.to_string()),
        };
        let probe = Probe { resolved, outcome };
        if self.enable_cache {
            self.cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(declared.to_string(), probe.clone());
        }
        probe
    }

    fn probe_all(&self, pending: &[&str]) -> HashMap<String, Probe> {
        if pending.len() <= self.parallel_threshold {
            tracing::debug!(candidates = pending.len(), "probing files sequentially");
            return pending
                .iter()
                .map(|d| (d.to_string(), self.probe(d)))
                .collect();
        }

        let workers = self.max_workers.min(pending.len());
        match build_thread_pool(workers) {
            Ok(pool) => {
                tracing::debug!(candidates = pending.len(), workers, "probing files in parallel");
                pool.install(|| {
                    pending
                        .par_iter()
                        .map(|d| (d.to_string(), self.probe(d)))
                        .collect()
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "falling back to sequential file probing");
                pending
                    .iter()
                    .map(|d| (d.to_string(), self.probe(d)))
                    .collect()
            }
        }
    }

    fn to_result(&self, declared: &str, field: &str, probe: &Probe) -> ValidationResult {
        let resolved = probe.resolved.display();
        match &probe.outcome {
            Outcome::Found => ValidationResult::ok(messages::file_accessible(declared))
                .at_str(field)
                .with_suggestion(format!("resolved: {resolved}")),
            Outcome::Missing => {
                ValidationResult::flagged(self.strict_mode, messages::file_not_found(declared))
                    .at_str(field)
                    .with_suggestion(format!("Check the file path; attempted: {resolved}"))
            }
            Outcome::Inaccessible(reason) => ValidationResult::flagged(
                self.strict_mode,
                messages::file_not_accessible(declared, reason),
            )
            .at_str(field)
            .with_suggestion(format!("Check permissions; attempted: {resolved}")),
        }
    }
}

impl Validator for FileChecker {
    fn name(&self) -> &'static str {
        "files"
    }

    #[tracing::instrument(skip_all, fields(strict = self.strict_mode))]
    fn validate(&self, doc: &Value) -> ValidationReport {
        let Some(norm) = Normalized::new(doc) else {
            return ValidationReport::from_results(Vec::new());
        };
        let Some(scope) = norm.scope() else {
            return ValidationReport::from_results(Vec::new());
        };

        let mut refs = SrcRefs::default();
        walk(scope, &mut norm.shape.scope_path(), &mut refs);

        let cached: HashMap<String, Probe> = if self.enable_cache {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            refs.items
                .iter()
                .filter_map(|(d, _)| cache.get(d).map(|p| (d.clone(), p.clone())))
                .collect()
        } else {
            HashMap::new()
        };
        let pending: Vec<&str> = refs
            .items
            .iter()
            .map(|(d, _)| d.as_str())
            .filter(|d| !cached.contains_key(*d))
            .collect();
        let fresh = self.probe_all(&pending);

        let results = refs
            .items
            .iter()
            .filter_map(|(declared, field)| {
                let probe = fresh.get(declared).or_else(|| cached.get(declared))?;
                Some(self.to_result(declared, field, probe))
            })
            .collect();

        let report = ValidationReport::from_results(results);
        tracing::debug!(
            candidates = refs.items.len(),
            cache_hits = cached.len(),
            probed = fresh.len(),
            errors = report.total_errors(),
            warnings = report.total_warnings(),
            "file validation finished"
        );
        report
    }
}

/// Distinct local `src` strings in document order, each with the path of its first occurrence.
#[derive(Default)]
struct SrcRefs {
    items: Vec<(String, String)>,
    seen: HashSet<String>,
}

impl Visitor for SrcRefs {
    fn visit_str(&mut self, path: &FieldPath, key: Option<&str>, value: &str) {
        if key != Some("src") || value.trim().is_empty() {
            return;
        }
        let target = rules::sole_placeholder(value).unwrap_or(value).trim();
        if rules::is_remote(target) {
            return;
        }
        if self.seen.insert(value.to_string()) {
            self.items.push((value.to_string(), path.to_string()));
        }
    }
}

fn default_max_workers() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
    (cpus * 2).min(8)
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn build_thread_pool(threads: usize) -> ClipcheckResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("clipcheck-files-{i}"))
        .build()
        .map_err(|e| {
            ClipcheckError::validation(format!("failed to build rayon thread pool: {e}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/validate/files.rs"]
mod tests;
