//! Content checksumming for source deduplication.
//!
//! Two sources are deduplication candidates when their serialized content
//! matches. The canonical byte form is the JSON encoding of the content
//! fields in fixed declaration order: `source_id`, `code`, `geometry`,
//! `rates`, `num_ruptures`, `samples`. Excluded: `grp_id` (group
//! membership must not distinguish otherwise identical sources) and the
//! assembler-assigned bookkeeping fields (`id`, `checksum`, the wkt cache
//! and the runtime stats), which are still at their defaults when
//! checksums are computed.
//!
//! The 32-bit value is the first four little-endian bytes of the blake3
//! digest of those bytes. It is a best-effort dedup key, not a
//! collision-free guarantee.

use hazard_source_model::{Geometry, Source, SourceGroup};
use serde::Serialize;

/// Borrowed view of a source's content fields, in canonical order.
#[derive(Serialize)]
struct ContentView<'a> {
    source_id: &'a str,
    code: u8,
    geometry: &'a Geometry,
    rates: &'a [f64],
    num_ruptures: u32,
    samples: u32,
}

/// Compute the 32-bit content checksum of a source.
///
/// Depends only on content, never on memory layout or iteration order.
#[must_use]
pub fn source_checksum(src: &Source) -> u32 {
    let view = ContentView {
        source_id: &src.source_id,
        code: src.code,
        geometry: &src.geometry,
        rates: &src.rates,
        num_ruptures: src.num_ruptures,
        samples: src.samples,
    };
    // Serialization of a fixed-field struct cannot fail.
    let bytes = serde_json::to_vec(&view).unwrap_or_default();
    let digest = blake3::hash(&bytes);
    let mut first = [0u8; 4];
    first.copy_from_slice(&digest.as_bytes()[..4]);
    u32::from_le_bytes(first)
}

/// Assign checksums to every source in every group.
pub fn assign_checksums(groups: &mut [SourceGroup]) {
    for grp in groups {
        for src in &mut grp.sources {
            src.checksum = source_checksum(src);
        }
    }
}
