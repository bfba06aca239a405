use crate::source::Source;
use serde::{Deserialize, Serialize};

/// An ordered collection of sources sharing a tectonic region type.
///
/// Atomic groups are never split or merged; all their sources are always
/// evaluated together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceGroup {
    /// Tectonic region type, the categorical regrouping key
    pub trt: String,

    /// Sources in this group, in file order
    pub sources: Vec<Source>,

    /// Whether this group must be kept as an indivisible unit
    #[serde(default)]
    pub atomic: bool,

    /// Number of uncertainty-driven mutations applied to this group
    #[serde(default)]
    pub changes: usize,
}

impl SourceGroup {
    /// Create a non-atomic group for the given tectonic region type.
    #[must_use]
    pub fn new(trt: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            trt: trt.into(),
            sources,
            atomic: false,
            changes: 0,
        }
    }

    /// Builder: mark the group atomic.
    #[must_use]
    pub fn atomic(mut self) -> Self {
        self.atomic = true;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }
}

impl<'a> IntoIterator for &'a SourceGroup {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Geometry;

    #[test]
    fn builder_sets_atomic_flag() {
        let grp = SourceGroup::new("Active Shallow Crust", vec![]).atomic();
        assert!(grp.atomic);
        assert!(grp.is_empty());
        assert_eq!(grp.changes, 0);
    }

    #[test]
    fn iteration_preserves_file_order() {
        let sources = vec![
            Source::new("A", b'P', Geometry::Point { lon: 0.0, lat: 0.0 }, vec![], 1),
            Source::new("B", b'P', Geometry::Point { lon: 1.0, lat: 0.0 }, vec![], 1),
        ];
        let grp = SourceGroup::new("Stable Continental", sources);
        let ids: Vec<_> = grp.iter().map(|s| s.source_id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
    }
}
