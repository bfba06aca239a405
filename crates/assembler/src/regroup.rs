//! Group-id assignment and checksum-based deduplication.
//!
//! Takes the validated per-realization group lists and produces the final
//! composite model: atomic groups pass through untouched (one group per
//! declaring realization), non-atomic groups are merged across
//! realizations by tectonic region type, and sources sharing a
//! `(source_id, checksum)` pair within a TRT bucket collapse into one
//! source referenced by all contributing groups.
//!
//! Identity assignment is a strictly sequential counter threaded through
//! the pass; its order depends only on realization ordinal order, TRT
//! encounter order and first-seen order within a bucket — never on read
//! completion order.

use crate::error::{AssemblerError, Result};
use hazard_source_model::{CompositeSourceModel, FullLogicTree, GrpId, Source, SourceGroup};
use std::collections::HashMap;

/// Regroup the per-realization groups into the composite model.
///
/// `groups` is indexed by realization ordinal; exclusive ownership is
/// required because group ids, samples, dense ids and wkt caches are
/// written in place.
pub fn regroup(
    full_lt: &FullLogicTree,
    groups: Vec<Vec<SourceGroup>>,
) -> Result<CompositeSourceModel> {
    let mut atomic: Vec<SourceGroup> = Vec::new();
    let mut trt_order: Vec<String> = Vec::new();
    let mut acc: HashMap<String, Vec<Source>> = HashMap::new();

    for (rlz, rlz_groups) in full_lt.realizations().iter().zip(groups) {
        for mut grp in rlz_groups {
            let grp_id = full_lt.grp_id(&grp.trt, rlz.ordinal).ok_or_else(|| {
                AssemblerError::UnknownTrt {
                    trt: grp.trt.clone(),
                    ordinal: rlz.ordinal,
                }
            })?;
            let grp_id =
                u16::try_from(grp_id).map_err(|_| AssemblerError::TooManyGroups { grp_id })?;

            for src in &mut grp.sources {
                src.grp_id = GrpId::Single(grp_id);
                if rlz.samples > 1 {
                    src.samples = rlz.samples;
                }
            }

            // Empty groups (e.g. fully sampled out) contribute nothing.
            if grp.is_empty() {
                continue;
            }
            if grp.atomic {
                atomic.push(grp);
            } else {
                if !acc.contains_key(&grp.trt) {
                    trt_order.push(grp.trt.clone());
                }
                acc.entry(grp.trt.clone()).or_default().extend(grp.sources);
            }
        }
    }

    // Dense identity counter, shared across TRT buckets and continued
    // into the atomic pass; its final value is the model's source count.
    let mut idx: u32 = 0;
    let mut src_groups = Vec::with_capacity(trt_order.len() + atomic.len());

    for trt in trt_order {
        let sources = acc.remove(&trt).unwrap_or_default();
        src_groups.push(SourceGroup::new(trt, dedup_sources(sources, &mut idx)));
    }

    for mut grp in atomic {
        for src in &mut grp.sources {
            src.id = idx;
            src.cache_wkt();
            idx += 1;
        }
        src_groups.push(grp);
    }

    Ok(CompositeSourceModel::new(full_lt.clone(), src_groups))
}

/// Collapse sources sharing a `(source_id, checksum)` pair into one,
/// keeping first-seen key order and assigning dense ids from `idx`.
fn dedup_sources(sources: Vec<Source>, idx: &mut u32) -> Vec<Source> {
    let mut key_order: Vec<(String, u32)> = Vec::new();
    let mut by_key: HashMap<(String, u32), Vec<Source>> = HashMap::new();
    for src in sources {
        let key = (src.source_id.clone(), src.checksum);
        by_key
            .entry(key.clone())
            .or_insert_with(|| {
                key_order.push(key.clone());
                Vec::new()
            })
            .push(src);
    }

    let mut deduped = Vec::with_capacity(key_order.len());
    for key in key_order {
        let mut dups = by_key.remove(&key).unwrap_or_default();
        let Some(mut survivor) = dups.pop() else {
            continue;
        };
        if !dups.is_empty() {
            let mut grp_ids: Vec<u16> = dups.iter().map(|s| s.grp_id.primary()).collect();
            grp_ids.push(survivor.grp_id.primary());
            survivor.grp_id = GrpId::Shared(grp_ids);
        }
        survivor.id = *idx;
        survivor.cache_wkt();
        *idx += 1;
        deduped.push(survivor);
    }
    deduped
}
