use crate::group::SourceGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One fully resolved combination of logic-tree choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Realization {
    /// 0-based ordinal, stable across runs
    pub ordinal: u16,

    /// Ordered branch ids defining this realization's position in the tree
    pub lt_path: Vec<String>,

    /// Whitespace-separated source model file names this realization draws from
    pub value: String,

    /// Realization weight
    pub weight: f64,

    /// Multiplicity (>= 1), propagated onto sources at regrouping
    pub samples: u32,
}

impl Realization {
    #[must_use]
    pub fn new(ordinal: u16, lt_path: Vec<String>, value: impl Into<String>) -> Self {
        Self {
            ordinal,
            lt_path,
            value: value.into(),
            weight: 1.0,
            samples: 1,
        }
    }

    /// Builder: set the multiplicity.
    #[must_use]
    pub const fn samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Builder: set the weight.
    #[must_use]
    pub const fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// The file names this realization is composed from, in declaration order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.value.split_whitespace()
    }
}

/// Source model logic tree, consumed through its boundary: file mapping,
/// cross-reference declarations and the uncertainty transformation.
///
/// The definition language and the transformation semantics are external;
/// tests exercise the assembly engine with stub implementations.
pub trait SourceModelLogicTree: Send + Sync {
    /// Path of the logic tree file; relative source model file names
    /// resolve against its parent directory.
    fn filename(&self) -> &Path;

    /// The realizations defined by the tree, in ordinal order.
    fn realizations(&self) -> &[Realization];

    /// Branch id to source model file paths, for every leaf branch.
    fn smpaths(&self) -> BTreeMap<String, Vec<PathBuf>>;

    /// Branch id to the source ids that branch declares it must affect
    /// (the `applyToSources` cross-reference map).
    fn apply_to_sources(&self) -> BTreeMap<String, Vec<String>>;

    /// Apply the uncertainties selected by `lt_path` to `groups`.
    ///
    /// `groups` is an exclusively owned deep copy; implementations mutate
    /// freely and report the number of mutations through each returned
    /// group's `changes` counter.
    fn apply_uncertainties(&self, lt_path: &[String], groups: Vec<SourceGroup>)
        -> Vec<SourceGroup>;
}

/// Ground motion logic tree, consumed only for its ordered tectonic
/// region types, which drive group-id derivation.
pub trait GsimLogicTree: Send + Sync {
    /// Ordered tectonic region type values.
    fn trts(&self) -> &[String];
}

/// Bundle of the source model and ground motion logic trees, carried
/// read-only through assembly and into the composite model.
#[derive(Clone)]
pub struct FullLogicTree {
    pub source_model_lt: Arc<dyn SourceModelLogicTree>,
    pub gsim_lt: Arc<dyn GsimLogicTree>,
}

impl FullLogicTree {
    #[must_use]
    pub fn new(
        source_model_lt: Arc<dyn SourceModelLogicTree>,
        gsim_lt: Arc<dyn GsimLogicTree>,
    ) -> Self {
        Self {
            source_model_lt,
            gsim_lt,
        }
    }

    /// The realizations of the source model logic tree, in ordinal order.
    #[must_use]
    pub fn realizations(&self) -> &[Realization] {
        self.source_model_lt.realizations()
    }

    /// Injective group-id derivation keyed by (TRT, realization ordinal):
    /// `ordinal * n_trts + trt_index`.
    ///
    /// Returns `None` for a tectonic region type the ground motion logic
    /// tree does not know. The value is unbounded here; the persistence
    /// record stores group ids as u16, so the assembler checks the range.
    #[must_use]
    pub fn grp_id(&self, trt: &str, ordinal: u16) -> Option<u32> {
        let trts = self.gsim_lt.trts();
        let trti = trts.iter().position(|t| t == trt)?;
        Some(u32::from(ordinal) * trts.len() as u32 + trti as u32)
    }
}

impl std::fmt::Debug for FullLogicTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullLogicTree")
            .field("filename", &self.source_model_lt.filename())
            .field("realizations", &self.realizations().len())
            .field("trts", &self.gsim_lt.trts())
            .finish()
    }
}
