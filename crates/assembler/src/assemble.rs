use crate::checksum::assign_checksums;
use crate::error::{AssemblerError, Result};
use crate::pool::{normalize_path, ReadCoordinator, ReadMode};
use crate::regroup::regroup;
use crate::stats::AssemblyStats;
use hazard_source_model::{
    CompositeSourceModel, FullLogicTree, SourceConverter, SourceGroup, SpatialFilter,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Assembles a composite source model from a logic tree: parallel file
/// reads, per-realization uncertainty application, content checksumming,
/// cross-reference validation and final regrouping.
pub struct ModelAssembler {
    converter: Arc<dyn SourceConverter>,
    srcfilter: Option<Arc<dyn SpatialFilter>>,
    mode: ReadMode,
}

impl ModelAssembler {
    /// Create an assembler around the given converter; the read mode
    /// comes from the environment (`HAZARD_DISTRIBUTE`).
    #[must_use]
    pub fn new(converter: Arc<dyn SourceConverter>) -> Self {
        Self {
            converter,
            srcfilter: None,
            mode: ReadMode::from_env(),
        }
    }

    /// Builder: enable sampling mode with the given spatial filter
    /// (`HAZARD_SAMPLE_SOURCES` territory; the filter stays explicit).
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

    /// Assemble the composite source model for the given logic tree.
    pub async fn assemble(&self, full_lt: &FullLogicTree) -> Result<CompositeSourceModel> {
        let (csm, _) = self.assemble_with_stats(full_lt).await?;
        Ok(csm)
    }

    /// Assemble, also reporting run statistics.
    pub async fn assemble_with_stats(
        &self,
        full_lt: &FullLogicTree,
    ) -> Result<(CompositeSourceModel, AssemblyStats)> {
        let start = Instant::now();
        let mut stats = AssemblyStats::new();
        let smlt = &full_lt.source_model_lt;

        log::info!("Reading the source model(s) in parallel");
        let allpaths: Vec<PathBuf> = smlt.smpaths().into_values().flatten().collect();
        let mut coordinator =
            ReadCoordinator::new(Arc::clone(&self.converter)).with_mode(self.mode);
        if let Some(srcfilter) = &self.srcfilter {
            coordinator = coordinator.with_filter(Arc::clone(srcfilter));
        }
        let smdict = coordinator.read_all(&allpaths).await?;
        stats.files = smdict.len();

        log::info!("Applying logic tree uncertainties");
        let smlt_dir = smlt.filename().parent().unwrap_or_else(|| Path::new("."));
        let apply_to_sources = smlt.apply_to_sources();
        let mut groups: Vec<Vec<SourceGroup>> = vec![Vec::new(); full_lt.realizations().len()];

        for rlz in full_lt.realizations() {
            for name in rlz.file_names() {
                let abs = normalize_path(&smlt_dir.join(name))?;
                let sm = smdict
                    .get(&abs)
                    .ok_or_else(|| AssemblerError::MissingModel { path: abs.clone() })?;

                // Deep copy before any mutation: no two realizations may
                // ever share a mutable source instance.
                let copied = sm.src_groups.clone();
                let mut src_groups = smlt.apply_uncertainties(&rlz.lt_path, copied);
                assign_checksums(&mut src_groups);
                groups[usize::from(rlz.ordinal)].extend(src_groups);
            }

            // Check applyToSources against this realization's reachable ids.
            let source_ids: HashSet<&str> = groups[usize::from(rlz.ordinal)]
                .iter()
                .flat_map(|grp| grp.iter().map(|src| src.source_id.as_str()))
                .collect();
            for (brid, srcids) in &apply_to_sources {
                if !rlz.lt_path.contains(brid) {
                    continue;
                }
                for srcid in srcids {
                    if !source_ids.contains(srcid.as_str()) {
                        return Err(AssemblerError::MissingSource {
                            source_id: srcid.clone(),
                            logic_tree: smlt.filename().to_path_buf(),
                        });
                    }
                }
            }
        }

        stats.changes = groups
            .iter()
            .flatten()
            .map(|grp| grp.changes)
            .sum();
        if stats.changes > 0 {
            log::info!(
                "Applied {} changes to the composite source model",
                stats.changes
            );
        }

        let csm = regroup(full_lt, groups)?;
        stats.sources = csm.num_sources();
        #[allow(clippy::cast_possible_truncation)]
        {
            stats.time_ms = start.elapsed().as_millis() as u64;
        }
        Ok((csm, stats))
    }
}
