use serde::{Deserialize, Serialize};

use crate::bookmark::{PipelineCounts, TreeStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkFileEntry {
    pub filename: String,
    pub size_bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub file_count: usize,
    pub files: Vec<BookmarkFileEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedSource {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentEntry {
    pub filename: String,
    pub sha256: String,
    pub has_root: bool,
    pub stats: TreeStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeOutputs {
    pub json_path: String,
    pub markup_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub source_directory: String,
    pub layout: String,
    pub preamble: String,
    pub dedup: bool,
    pub outputs: MergeOutputs,
    pub counts: PipelineCounts,
    pub folders: Vec<String>,
    pub documents: Vec<DocumentEntry>,
    pub rejected: Vec<RejectedSource>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundTripStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundTripEntry {
    pub filename: String,
    pub status: RoundTripStatus,
    pub parsed: Option<TreeStats>,
    pub reparsed: Option<TreeStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub preamble: String,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub entries: Vec<RoundTripEntry>,
    pub rejected: Vec<RejectedSource>,
}
