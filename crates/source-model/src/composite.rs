use crate::group::SourceGroup;
use crate::logic_tree::FullLogicTree;
use crate::source::Source;
use serde::{Deserialize, Serialize};

/// The final assembly artifact: the logic tree metadata bundle plus the
/// deduplicated source groups, non-atomic TRT groups first, then atomic
/// groups in original realization order.
///
/// Read-only once built. Every source `id` is unique and dense across
/// the whole model.
#[derive(Debug, Clone)]
pub struct CompositeSourceModel {
    pub full_lt: FullLogicTree,
    pub src_groups: Vec<SourceGroup>,
}

impl CompositeSourceModel {
    #[must_use]
    pub fn new(full_lt: FullLogicTree, src_groups: Vec<SourceGroup>) -> Self {
        Self {
            full_lt,
            src_groups,
        }
    }

    /// All sources across all groups, in group order.
    pub fn get_sources(&self) -> impl Iterator<Item = &Source> {
        self.src_groups.iter().flat_map(SourceGroup::iter)
    }

    /// Total number of sources in the model.
    #[must_use]
    pub fn num_sources(&self) -> usize {
        self.src_groups.iter().map(SourceGroup::len).sum()
    }

    /// Persistence records for every source, one per source.
    #[must_use]
    pub fn source_info(&self, sm_id: u16) -> Vec<SourceInfo> {
        self.get_sources()
            .map(|src| SourceInfo::from_source(sm_id, src))
            .collect()
    }
}

/// Per-source persistence record; field names, order and widths are the
/// serialization contract with the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceInfo {
    pub sm_id: u16,
    pub grp_id: u16,
    pub source_id: String,
    pub code: u8,
    pub num_ruptures: u32,
    pub calc_time: f32,
    pub num_sites: f32,
    pub eff_ruptures: f32,
    pub checksum: u32,
    pub wkt: String,
}

impl SourceInfo {
    /// Build the record for one source. For a source shared by multiple
    /// groups the first contributing group id is recorded.
    #[must_use]
    pub fn from_source(sm_id: u16, src: &Source) -> Self {
        Self {
            sm_id,
            grp_id: src.grp_id.primary(),
            source_id: src.source_id.clone(),
            code: src.code,
            num_ruptures: src.num_ruptures,
            calc_time: src.calc_time,
            num_sites: src.num_sites,
            eff_ruptures: src.eff_ruptures,
            checksum: src.checksum,
            wkt: src.wkt.clone().unwrap_or_default(),
        }
    }
}
