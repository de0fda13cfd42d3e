use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::InventoryArgs;
use crate::commands::source::{discover_bookmark_files, display_name};
use crate::model::{BookmarkFileEntry, BookmarkInventoryManifest};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.source_dir)?;

    if args.dry_run {
        info!(
            file_count = manifest.file_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        args.source_dir
            .join("manifests")
            .join("bookmark_inventory.json")
    });

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(file_count = manifest.file_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(source_dir: &Path) -> Result<BookmarkInventoryManifest> {
    let paths = discover_bookmark_files(source_dir)?;

    if paths.is_empty() {
        bail!("no .htm/.html files found in {}", source_dir.display());
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let size_bytes = fs::metadata(&path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();
        let sha256 = sha256_file(&path)?;

        files.push(BookmarkFileEntry {
            filename: display_name(&path),
            size_bytes,
            sha256,
        });
    }

    Ok(BookmarkInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: source_dir.display().to_string(),
        file_count: files.len(),
        files,
    })
}
