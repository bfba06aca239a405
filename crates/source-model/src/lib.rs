//! # Hazard Source Model
//!
//! Data model and external-interface boundary for composite source model
//! assembly.
//!
//! ## Structure
//!
//! ```text
//! Source ── smallest model unit (geometry, rates, identity fields)
//!    │
//! SourceGroup ── ordered sources sharing a tectonic region type
//!    │
//! Realization ── one resolved logic-tree path over model files
//!    │
//! CompositeSourceModel ── deduplicated groups + logic tree metadata
//! ```
//!
//! Parsing of model files, the logic-tree definition language and spatial
//! filtering live behind the [`SourceConverter`], [`SourceModelLogicTree`],
//! [`GsimLogicTree`] and [`SpatialFilter`] traits.

mod composite;
mod convert;
mod error;
mod group;
mod logic_tree;
mod source;

pub use composite::{CompositeSourceModel, SourceInfo};
pub use convert::{ParsedModel, SourceConverter, SpatialFilter};
pub use error::{ModelError, Result};
pub use group::SourceGroup;
pub use logic_tree::{FullLogicTree, GsimLogicTree, Realization, SourceModelLogicTree};
pub use source::{Geometry, GrpId, Source};
