//! Bookmark export compiler: parses the exported markup into folder trees,
//! merges and reshapes them, and renders them back.

mod attributes;
mod builder;
mod dedup;
mod flatten;
mod line;
mod merge;
mod partition;
mod pipeline;
mod render;
mod tree;

#[cfg(test)]
mod tests;

pub use builder::{PreambleMode, parse_document};
pub use pipeline::{Layout, PipelineCounts, PipelineOptions, run_pipeline};
pub use render::render_document;
pub use tree::{Group, Item, TreeStats};
