use serde::Serialize;

/// Statistics aggregated by file extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionStats {
    pub extension: String,
    pub compressed_size: u64,
    pub blob_count: u64,
    pub file_count: u64,
}
