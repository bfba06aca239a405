use crate::error::{AssemblerError, Result};
use crate::reader::read_source_model;
use hazard_source_model::{ParsedModel, SourceConverter, SpatialFilter};
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Concurrency mode of the read coordinator.
///
/// Sequential mode is behaviorally identical to parallel mode (same
/// outputs, same errors); only the wall-clock concurrency differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    Sequential,
    Parallel,
}

impl ReadMode {
    /// `HAZARD_DISTRIBUTE=no` forces sequential reads, mirroring the
    /// embedded/debugging invocation; anything else keeps the default
    /// parallel mode.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("HAZARD_DISTRIBUTE") {
            Ok(value) if value == "no" => Self::Sequential,
            _ => Self::Parallel,
        }
    }
}

/// Dispatches one file-reader invocation per distinct source model file
/// and collects the results into a map keyed by normalized absolute path.
///
/// Workers are scoped to the `read_all` call: every spawned task is
/// awaited before the call returns, error or not.
pub struct ReadCoordinator {
    converter: Arc<dyn SourceConverter>,
    srcfilter: Option<Arc<dyn SpatialFilter>>,
    mode: ReadMode,
}

impl ReadCoordinator {
    #[must_use]
    pub fn new(converter: Arc<dyn SourceConverter>) -> Self {
        Self {
            converter,
            srcfilter: None,
            mode: ReadMode::from_env(),
        }
    }

    /// Builder: enable sampling mode with the given spatial filter.
    #[must_use]
    pub fn with_filter(mut self, srcfilter: Arc<dyn SpatialFilter>) -> Self {
        self.srcfilter = Some(srcfilter);
        self
    }

    /// Builder: override the concurrency mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ReadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Read every distinct file once and return the path → model map.
    ///
    /// Any parse failure aborts the whole read; partial results are
    /// discarded, never returned.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<HashMap<PathBuf, ParsedModel>> {
        let mut distinct = Vec::with_capacity(paths.len());
        let mut seen = HashSet::new();
        for path in paths {
            let abs = normalize_path(path)?;
            if seen.insert(abs.clone()) {
                distinct.push(abs);
            }
        }

        let models = match self.mode {
            ReadMode::Sequential => self.read_sequential(&distinct)?,
            ReadMode::Parallel => self.read_parallel(&distinct).await?,
        };

        Ok(models
            .into_iter()
            .map(|sm| (sm.fname.clone(), sm))
            .collect())
    }

    fn read_sequential(&self, paths: &[PathBuf]) -> Result<Vec<ParsedModel>> {
        let mut models = Vec::with_capacity(paths.len());
        for path in paths {
            models.push(read_source_model(
                path,
                self.converter.as_ref(),
                self.srcfilter.as_deref(),
            )?);
        }
        Ok(models)
    }

    /// Bounded fan-out: parsing is CPU-bound, so a hardcoded high
    /// concurrency only causes memory spikes on large logic trees.
    async fn read_parallel(&self, paths: &[PathBuf]) -> Result<Vec<ParsedModel>> {
        let max_concurrent = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(2, 8);

        let mut models = Vec::with_capacity(paths.len());
        let mut first_err: Option<AssemblerError> = None;

        for chunk in paths.chunks(max_concurrent) {
            let mut tasks = Vec::with_capacity(chunk.len());
            for path in chunk {
                let path = path.clone();
                let converter = Arc::clone(&self.converter);
                let srcfilter = self.srcfilter.clone();
                tasks.push(tokio::task::spawn_blocking(move || {
                    read_source_model(&path, converter.as_ref(), srcfilter.as_deref())
                }));
            }

            // Drain the whole chunk before surfacing any error, so no
            // worker outlives the call.
            for task in tasks {
                match task.await {
                    Ok(Ok(sm)) => models.push(sm),
                    Ok(Err(e)) => {
                        first_err.get_or_insert(e);
                    }
                    Err(e) => {
                        first_err.get_or_insert(AssemblerError::TaskFailed(e.to_string()));
                    }
                }
            }
            if let Some(err) = first_err.take() {
                return Err(err);
            }
        }

        Ok(models)
    }
}

/// Make a path absolute and lexically normalized (`.` and `..` removed)
/// so that relative file names declared in the logic tree resolve to the
/// same map keys as the paths handed to the readers.
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    Ok(cleaned)
}
