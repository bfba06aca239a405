use crate::error::Result;
use hazard_source_model::{ParsedModel, Source, SourceConverter, SpatialFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Pick at most one source close to the sites of interest.
///
/// Seeded for reproducibility: repeatedly choose a uniformly random
/// remaining candidate, keeping the first one the filter reports close
/// and discarding rejected ones until the pool is exhausted.
#[must_use]
pub fn random_filtered_sources(
    mut sources: Vec<Source>,
    srcfilter: &dyn SpatialFilter,
    seed: u64,
) -> Vec<Source> {
    let mut rng = StdRng::seed_from_u64(seed);
    while !sources.is_empty() {
        let i = rng.gen_range(0..sources.len());
        if srcfilter.get_close_sites(&sources[i]).is_some() {
            return vec![sources.swap_remove(i)];
        }
        sources.remove(i);
    }
    Vec::new()
}

/// Read one source model file, optionally sampling each group down to a
/// single source close to the sites of interest (seeded per group index).
///
/// The result is tagged with its originating path. Parse errors propagate
/// verbatim; a file that fails to parse is a fatal input error.
pub fn read_source_model(
    path: &Path,
    converter: &dyn SourceConverter,
    srcfilter: Option<&dyn SpatialFilter>,
) -> Result<ParsedModel> {
    let mut sm = converter.parse(path)?;
    if let Some(filter) = srcfilter {
        for (i, sg) in sm.src_groups.iter_mut().enumerate() {
            let sources = std::mem::take(&mut sg.sources);
            sg.sources = random_filtered_sources(sources, filter, i as u64);
        }
    }
    sm.fname = path.to_path_buf();
    Ok(sm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazard_source_model::Geometry;
    use pretty_assertions::assert_eq;

    /// Accepts only sources whose id is in the allow list.
    struct AllowList(Vec<&'static str>);

    impl SpatialFilter for AllowList {
        fn get_close_sites(&self, src: &Source) -> Option<Vec<usize>> {
            self.0.contains(&src.source_id.as_str()).then(|| vec![0])
        }
    }

    fn sources(ids: &[&str]) -> Vec<Source> {
        ids.iter()
            .map(|id| {
                Source::new(
                    *id,
                    b'P',
                    Geometry::Point { lon: 0.0, lat: 0.0 },
                    vec![0.1],
                    1,
                )
            })
            .collect()
    }

    #[test]
    fn keeps_exactly_the_one_passing_source() {
        let filter = AllowList(vec!["C"]);
        let kept = random_filtered_sources(sources(&["A", "B", "C"]), &filter, 0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_id, "C");
    }

    #[test]
    fn returns_empty_when_pool_is_exhausted() {
        let filter = AllowList(vec![]);
        let kept = random_filtered_sources(sources(&["A", "B", "C"]), &filter, 0);
        assert!(kept.is_empty());
    }

    #[test]
    fn same_seed_same_pick() {
        let filter = AllowList(vec!["A", "B", "C"]);
        let first = random_filtered_sources(sources(&["A", "B", "C"]), &filter, 7);
        let second = random_filtered_sources(sources(&["A", "B", "C"]), &filter, 7);
        assert_eq!(first[0].source_id, second[0].source_id);
    }
}
