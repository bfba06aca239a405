use serde::{Deserialize, Serialize};

/// Statistics about one assembly run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Number of distinct source model files read
    pub files: usize,

    /// Number of sources in the composite model after deduplication
    pub sources: usize,

    /// Total uncertainty-driven changes applied across all realizations
    pub changes: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl AssemblyStats {
    pub fn new() -> Self {
        Self {
            files: 0,
            sources: 0,
            changes: 0,
            time_ms: 0,
        }
    }
}

impl Default for AssemblyStats {
    fn default() -> Self {
        Self::new()
    }
}
