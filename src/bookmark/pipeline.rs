use serde::Serialize;

use super::dedup::dedup_links;
use super::flatten::flatten_folders;
use super::merge::merge_documents;
use super::partition::partition_by_protocol;
use super::render::render_document;
use super::tree::{Group, Item};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Layout {
    /// Keep the merged folder structure.
    #[default]
    Nested,
    /// Links only, directly under each top-level folder.
    Flat,
    /// Flattened, then split into `http`/`https`/`none` sub-folders.
    Protocol,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub layout: Layout,
    pub dedup: bool,
    /// Stamp for folders synthesised by the protocol layout.
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineCounts {
    pub documents: usize,
    pub top_level_folders: usize,
    pub anchors_before_dedup: usize,
    pub anchors_after_dedup: usize,
    pub duplicates_removed: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub tree: Group,
    pub markup: String,
    pub counts: PipelineCounts,
}

/// Merges parsed document roots, removes duplicate links, applies the chosen
/// layout and renders the result.
pub fn run_pipeline(roots: Vec<Group>, options: &PipelineOptions) -> PipelineOutput {
    let documents = roots.len();

    let merged = merge_documents(roots);
    let anchors_before_dedup = merged.stats().anchors;

    let deduped = if options.dedup {
        dedup_links(merged)
    } else {
        merged
    };
    let anchors_after_dedup = deduped.stats().anchors;

    let tree = match options.layout {
        Layout::Nested => deduped,
        Layout::Flat => flatten_folders(deduped),
        Layout::Protocol => partition_by_protocol(flatten_folders(deduped), &options.timestamp),
    };

    let top_level_folders = tree
        .items
        .iter()
        .filter(|item| matches!(item, Item::Group(_)))
        .count();
    let markup = render_document(&tree);

    PipelineOutput {
        tree,
        markup,
        counts: PipelineCounts {
            documents,
            top_level_folders,
            anchors_before_dedup,
            anchors_after_dedup,
            duplicates_removed: anchors_before_dedup - anchors_after_dedup,
        },
    }
}
