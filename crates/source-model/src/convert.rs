use crate::error::Result;
use crate::group::SourceGroup;
use crate::source::Source;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One parsed source model, tagged with its originating file path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedModel {
    /// Path of the file this model was read from
    pub fname: PathBuf,

    /// Ordered source groups as declared in the file
    pub src_groups: Vec<SourceGroup>,
}

impl ParsedModel {
    #[must_use]
    pub fn new(fname: impl Into<PathBuf>, src_groups: Vec<SourceGroup>) -> Self {
        Self {
            fname: fname.into(),
            src_groups,
        }
    }
}

/// Parses one source model file into ordered groups of sources.
///
/// The file format and the validity-rule configuration are external
/// concerns captured at construction; the assembly engine only calls
/// `parse`. Errors must name the offending file (line context in the
/// message) and are treated as fatal, never retried.
pub trait SourceConverter: Send + Sync {
    fn parse(&self, path: &Path) -> Result<ParsedModel>;
}

/// Predicate reporting the sites of interest close to a source, if any.
///
/// Consumed only by the optional sampling mode of the file reader.
pub trait SpatialFilter: Send + Sync {
    fn get_close_sites(&self, src: &Source) -> Option<Vec<usize>>;
}
