//! Stub implementations of the external interfaces (converter, logic
//! trees, spatial filter) plus fixture helpers shared by the integration
//! tests.
#![allow(dead_code)]

use hazard_source_model::{
    Geometry, GsimLogicTree, ModelError, ParsedModel, Realization, Source, SourceConverter,
    SourceGroup, SourceModelLogicTree, SpatialFilter,
};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Converter over a JSON encoding of `Vec<SourceGroup>`.
pub struct JsonConverter;

impl SourceConverter for JsonConverter {
    fn parse(&self, path: &Path) -> hazard_source_model::Result<ParsedModel> {
        let text = std::fs::read_to_string(path)?;
        let src_groups: Vec<SourceGroup> = serde_json::from_str(&text)
            .map_err(|e| ModelError::parse(path, e.to_string()))?;
        Ok(ParsedModel::new(path, src_groups))
    }
}

/// Source model logic tree stub: fixed realizations and file mapping,
/// with per-branch uncertainties expressed as rate deltas.
pub struct StubSmlt {
    pub filename: PathBuf,
    pub rlzs: Vec<Realization>,
    pub smpaths: BTreeMap<String, Vec<PathBuf>>,
    pub apply_to: BTreeMap<String, Vec<String>>,
    /// branch id -> delta added to every source's first rate
    pub perturbations: HashMap<String, f64>,
}

impl StubSmlt {
    pub fn new(filename: impl Into<PathBuf>, rlzs: Vec<Realization>) -> Self {
        Self {
            filename: filename.into(),
            rlzs,
            smpaths: BTreeMap::new(),
            apply_to: BTreeMap::new(),
            perturbations: HashMap::new(),
        }
    }
}

impl SourceModelLogicTree for StubSmlt {
    fn filename(&self) -> &Path {
        &self.filename
    }

    fn realizations(&self) -> &[Realization] {
        &self.rlzs
    }

    fn smpaths(&self) -> BTreeMap<String, Vec<PathBuf>> {
        self.smpaths.clone()
    }

    fn apply_to_sources(&self) -> BTreeMap<String, Vec<String>> {
        self.apply_to.clone()
    }

    fn apply_uncertainties(
        &self,
        lt_path: &[String],
        mut groups: Vec<SourceGroup>,
    ) -> Vec<SourceGroup> {
        for brid in lt_path {
            let Some(delta) = self.perturbations.get(brid) else {
                continue;
            };
            for grp in &mut groups {
                for src in &mut grp.sources {
                    if let Some(rate) = src.rates.first_mut() {
                        *rate += delta;
                        grp.changes += 1;
                    }
                }
            }
        }
        groups
    }
}

/// Ground motion logic tree stub: ordered TRT values only.
pub struct StubGsim(pub Vec<String>);

impl GsimLogicTree for StubGsim {
    fn trts(&self) -> &[String] {
        &self.0
    }
}

/// Spatial filter stub passing only the listed source ids.
pub struct CloseTo(pub Vec<String>);

impl SpatialFilter for CloseTo {
    fn get_close_sites(&self, src: &Source) -> Option<Vec<usize>> {
        self.0.contains(&src.source_id).then(|| vec![0])
    }
}

pub fn point_source(source_id: &str, lon: f64) -> Source {
    Source::new(
        source_id,
        b'P',
        Geometry::Point { lon, lat: 45.0 },
        vec![0.01],
        10,
    )
}

/// Serialize groups to a model file under `dir` and return its path.
pub fn write_model(dir: &Path, name: &str, groups: &[SourceGroup]) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(groups).expect("serialize model");
    std::fs::write(&path, json).expect("write model file");
    path
}

pub fn trts(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
