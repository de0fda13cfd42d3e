use anyhow::{Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::bookmark::{
    Item, PipelineOptions, PreambleMode, TreeStats, parse_document, run_pipeline,
};
use crate::cli::MergeArgs;
use crate::commands::source::load_sources;
use crate::model::{DocumentEntry, MergeOutputs, MergeRunManifest};
use crate::util::{
    epoch_seconds_string, now_utc_string, sha256_text, utc_compact_string, write_json_pretty,
    write_text,
};

pub fn run(args: MergeArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("merge-{}", utc_compact_string(started_ts));

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.source_dir.join("output"));
    let json_path = output_dir.join("bookmarks.json");
    let markup_path = output_dir.join("bookmarks.html");
    let manifest_path = output_dir.join(format!(
        "merge_run_{}.json",
        utc_compact_string(started_ts)
    ));

    info!(source = %args.source_dir.display(), run_id = %run_id, "starting merge");

    let sources = load_sources(&args.source_dir)?;
    let mode = PreambleMode::from(args.preamble);

    let mut roots = Vec::with_capacity(sources.documents.len());
    let mut documents = Vec::with_capacity(sources.documents.len());
    let mut warnings = Vec::new();

    for source in &sources.documents {
        let tree = parse_document(&source.text, mode);
        let stats = tree.as_ref().map(|root| root.stats()).unwrap_or_default();

        if tree.is_none() {
            warn!(file = %source.path.display(), "no folder found in export, skipping");
            warnings.push(format!("{}: no folder found", source.filename));
        }

        documents.push(DocumentEntry {
            filename: source.filename.clone(),
            sha256: sha256_text(&source.text),
            has_root: tree.is_some(),
            stats,
        });
        roots.extend(tree);
    }

    if roots.is_empty() {
        bail!(
            "none of the exports in {} contained a folder",
            args.source_dir.display()
        );
    }

    let options = PipelineOptions {
        layout: args.layout.into(),
        dedup: !args.keep_duplicates,
        timestamp: epoch_seconds_string(started_ts),
    };
    let output = run_pipeline(roots, &options);
    let merged_stats: TreeStats = output.tree.stats();
    let folders: Vec<String> = output
        .tree
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Group(group) => group.name().map(str::to_owned),
            Item::Anchor(_) => None,
        })
        .collect();

    write_json_pretty(&json_path, &output.tree)?;
    write_text(&markup_path, &output.markup)?;
    info!(
        json = %json_path.display(),
        markup = %markup_path.display(),
        folders = merged_stats.groups,
        anchors = merged_stats.anchors,
        duplicates_removed = output.counts.duplicates_removed,
        layout = args.layout.as_str(),
        "wrote merged bookmarks"
    );

    let manifest = MergeRunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        completed_at: now_utc_string(),
        source_directory: args.source_dir.display().to_string(),
        layout: args.layout.as_str().to_string(),
        preamble: args.preamble.as_str().to_string(),
        dedup: options.dedup,
        outputs: MergeOutputs {
            json_path: json_path.display().to_string(),
            markup_path: markup_path.display().to_string(),
        },
        counts: output.counts,
        folders,
        documents,
        rejected: sources.rejected,
        warnings,
    };
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote merge run manifest");

    Ok(())
}
