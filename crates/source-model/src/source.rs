use serde::{Deserialize, Serialize};

/// A seismic source, the smallest unit of a source model.
///
/// Created by a [`crate::SourceConverter`]; the assembly engine fills in
/// `checksum`, `id`, `grp_id`, `samples` and the wkt cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    /// Author-assigned identifier, stable but not globally unique across files
    pub source_id: String,

    /// Single-byte source type code (e.g. b'P' for point sources)
    pub code: u8,

    /// Source geometry
    pub geometry: Geometry,

    /// Occurrence-rate payload, treated opaquely by the assembly engine
    pub rates: Vec<f64>,

    /// Total number of ruptures this source can generate
    pub num_ruptures: u32,

    /// Multiplicity weight (>= 1), overridden by the realization's samples
    #[serde(default = "default_samples")]
    pub samples: u32,

    /// Content checksum, assigned after uncertainty application
    #[serde(default)]
    pub checksum: u32,

    /// Globally unique dense identifier, assigned at the final dedup step
    #[serde(default)]
    pub id: u32,

    /// Group identifier(s); a list only when the deduplicated source is
    /// shared by multiple groups
    #[serde(default)]
    pub grp_id: GrpId,

    /// Accumulated calculation time (filled by downstream processing)
    #[serde(default)]
    pub calc_time: f32,

    /// Number of affected sites (filled by downstream processing)
    #[serde(default)]
    pub num_sites: f32,

    /// Effective rupture count (filled by downstream processing)
    #[serde(default)]
    pub eff_ruptures: f32,

    /// Cached well-known-text representation of the geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt: Option<String>,
}

const fn default_samples() -> u32 {
    1
}

impl Source {
    /// Create a source with the given content attributes; bookkeeping
    /// fields start at their defaults.
    #[must_use]
    pub fn new(
        source_id: impl Into<String>,
        code: u8,
        geometry: Geometry,
        rates: Vec<f64>,
        num_ruptures: u32,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            code,
            geometry,
            rates,
            num_ruptures,
            samples: 1,
            checksum: 0,
            id: 0,
            grp_id: GrpId::default(),
            calc_time: 0.0,
            num_sites: 0.0,
            eff_ruptures: 0.0,
            wkt: None,
        }
    }

    /// Render and cache the well-known-text representation.
    ///
    /// Computed once per surviving source at identity assignment; reads
    /// after that point use the cache.
    pub fn cache_wkt(&mut self) -> &str {
        if self.wkt.is_none() {
            self.wkt = Some(self.geometry.to_wkt());
        }
        self.wkt.as_deref().unwrap_or_default()
    }
}

/// Group identifier(s) attached to a source.
///
/// `Shared` appears only when elements with identical
/// `(source_id, checksum)` from multiple groups were collapsed into one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GrpId {
    Single(u16),
    Shared(Vec<u16>),
}

impl GrpId {
    /// The first (or only) group id; used by the persistence record.
    #[must_use]
    pub fn primary(&self) -> u16 {
        match self {
            Self::Single(gid) => *gid,
            Self::Shared(gids) => gids.first().copied().unwrap_or_default(),
        }
    }

    /// All group ids referencing this source, in encounter order.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        match self {
            Self::Single(gid) => std::slice::from_ref(gid),
            Self::Shared(gids) => gids,
        }
    }
}

impl Default for GrpId {
    fn default() -> Self {
        Self::Single(0)
    }
}

/// Source geometry, opaque to the assembly engine except for its
/// well-known-text rendering and its contribution to the content checksum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Point { lon: f64, lat: f64 },
    Line { coords: Vec<[f64; 2]> },
    Polygon { exterior: Vec<[f64; 2]> },
}

impl Geometry {
    /// Well-known-text representation of the geometry.
    #[must_use]
    pub fn to_wkt(&self) -> String {
        match self {
            Self::Point { lon, lat } => format!("POINT({lon} {lat})"),
            Self::Line { coords } => format!("LINESTRING({})", coord_list(coords)),
            Self::Polygon { exterior } => format!("POLYGON(({}))", coord_list(exterior)),
        }
    }
}

fn coord_list(coords: &[[f64; 2]]) -> String {
    coords
        .iter()
        .map(|[lon, lat]| format!("{lon} {lat}"))
        .collect::<Vec<_>>()
        .join(", ")
}
