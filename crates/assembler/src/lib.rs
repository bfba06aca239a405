//! # Hazard Assembler
//!
//! Logic-tree-driven composite source model assembly.
//!
//! ## Pipeline
//!
//! ```text
//! Logic tree
//!     │
//!     ├──> Read Coordinator (bounded fan-out, one task per file)
//!     │      └─> path → parsed model map
//!     │
//!     ├──> Realization materializer (deep copy + apply uncertainties)
//!     │      └─> per-realization group lists, checksummed, validated
//!     │
//!     └──> Regrouper (TRT buckets, checksum dedup, dense ids)
//!            └─> CompositeSourceModel
//! ```
//!
//! Only the file reads run concurrently; everything after the path → model
//! map is single-threaded, so the final identity assignment never depends
//! on read completion order.
//!
//! ## Example
//!
//! ```no_run
//! use hazard_assembler::ModelAssembler;
//! use hazard_source_model::FullLogicTree;
//! # async fn run(converter: std::sync::Arc<dyn hazard_source_model::SourceConverter>,
//! #              full_lt: FullLogicTree) -> hazard_assembler::Result<()> {
//! let csm = ModelAssembler::new(converter).assemble(&full_lt).await?;
//! println!("{} sources", csm.num_sources());
//! # Ok(())
//! # }
//! ```

mod assemble;
mod checksum;
mod error;
mod pool;
mod reader;
mod regroup;
mod stats;

pub use assemble::ModelAssembler;
pub use checksum::{assign_checksums, source_checksum};
pub use error::{AssemblerError, Result};
pub use pool::{normalize_path, ReadCoordinator, ReadMode};
pub use reader::{random_filtered_sources, read_source_model};
pub use regroup::regroup;
pub use stats::AssemblyStats;
