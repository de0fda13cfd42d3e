use anyhow::Result;
use tracing::{info, warn};

use crate::bookmark::{Group, PreambleMode, parse_document};
use crate::cli::ParseArgs;
use crate::commands::source::load_sources;
use crate::util::write_json_pretty;

/// Writes one JSON tree per readable export; exports without any folder
/// serialise as `null`.
pub fn run(args: ParseArgs) -> Result<()> {
    let sources = load_sources(&args.source_dir)?;
    let mode = PreambleMode::from(args.preamble);

    let trees: Vec<Option<Group>> = sources
        .documents
        .iter()
        .map(|source| {
            let tree = parse_document(&source.text, mode);
            match &tree {
                Some(root) => {
                    let stats = root.stats();
                    info!(
                        file = %source.path.display(),
                        folders = stats.groups,
                        anchors = stats.anchors,
                        "parsed bookmark export"
                    );
                }
                None => warn!(file = %source.path.display(), "no folder found in export"),
            }
            tree
        })
        .collect();

    let output = args
        .output
        .unwrap_or_else(|| args.source_dir.join("output.json"));
    write_json_pretty(&output, &trees)?;
    info!(
        path = %output.display(),
        documents = trees.len(),
        rejected = sources.rejected.len(),
        preamble = args.preamble.as_str(),
        "wrote parsed trees"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::bookmark::render_document;
    use crate::cli::PreambleArg;

    #[test]
    fn writes_json_array_with_null_for_empty_exports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Group::default();
        fs::write(dir.path().join("a.html"), render_document(&root)).expect("write a");
        fs::write(dir.path().join("b.html"), "no bookmarks here").expect("write b");

        let output = dir.path().join("out").join("trees.json");
        run(ParseArgs {
            source_dir: dir.path().to_path_buf(),
            output: Some(output.clone()),
            preamble: PreambleArg::Fixed,
        })
        .expect("parse command");

        let raw = fs::read_to_string(&output).expect("read output");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(
            value,
            serde_json::json!([
                {"type": "group", "header": null, "item": []},
                null
            ])
        );
    }
}
