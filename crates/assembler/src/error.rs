use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssemblerError>;

#[derive(Error, Debug)]
pub enum AssemblerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model error: {0}")]
    Model(#[from] hazard_source_model::ModelError),

    /// A realization names a source model file the logic tree never declared.
    #[error("Source model file {} is not declared by the logic tree", .path.display())]
    MissingModel { path: PathBuf },

    /// An `applyToSources` declaration names a source id absent from the
    /// realizations sharing that branch.
    #[error(
        "The source {source_id} is not in the source model, please fix \
         applyToSources in {} or the source model", .logic_tree.display()
    )]
    MissingSource {
        source_id: String,
        logic_tree: PathBuf,
    },

    /// A group's tectonic region type is unknown to the ground motion
    /// logic tree, so no group id can be derived for it.
    #[error("Unknown tectonic region type {trt:?} in realization {ordinal}")]
    UnknownTrt { trt: String, ordinal: u16 },

    /// Group-id derivation exceeded the 16-bit record width.
    #[error("Too many source groups: grp_id {grp_id} does not fit in 16 bits")]
    TooManyGroups { grp_id: u32 },

    /// A reader task failed to complete (panic or cancellation).
    #[error("Read task failed: {0}")]
    TaskFailed(String),
}
