use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::model::RejectedSource;

const BOOKMARK_EXTENSIONS: &[&str] = &["htm", "html"];

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub filename: String,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct SourceSet {
    pub documents: Vec<SourceDocument>,
    pub rejected: Vec<RejectedSource>,
}

/// Discovers and reads every bookmark export in `source_dir`.
///
/// Unreadable files are logged and reported in `rejected`; the call fails only
/// when there is nothing to read or every read failed.
pub fn load_sources(source_dir: &Path) -> Result<SourceSet> {
    let paths = discover_bookmark_files(source_dir)?;
    if paths.is_empty() {
        bail!("no .htm/.html files found in {}", source_dir.display());
    }

    let sources = read_sources(&paths);

    for rejected in &sources.rejected {
        warn!(file = %rejected.filename, reason = %rejected.reason, "skipping unreadable source");
    }
    if sources.documents.is_empty() {
        bail!(
            "all {} source files in {} failed to read",
            paths.len(),
            source_dir.display()
        );
    }

    info!(
        source = %source_dir.display(),
        read = sources.documents.len(),
        rejected = sources.rejected.len(),
        "loaded bookmark sources"
    );

    Ok(sources)
}

pub fn discover_bookmark_files(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let entries = fs::read_dir(source_dir)
        .with_context(|| format!("failed to read {}", source_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", source_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        if is_bookmark_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_bookmark_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            BOOKMARK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Reads all `paths` in parallel, keeping input order among the successes.
pub fn read_sources(paths: &[PathBuf]) -> SourceSet {
    let results: Vec<_> = paths.par_iter().map(|path| read_source(path)).collect();

    let mut set = SourceSet::default();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(document) => set.documents.push(document),
            Err(err) => set.rejected.push(RejectedSource {
                filename: display_name(path),
                reason: format!("{err:#}"),
            }),
        }
    }
    set
}

fn read_source(path: &Path) -> Result<SourceDocument> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(file = %path.display(), "export is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };

    Ok(SourceDocument {
        path: path.to_path_buf(),
        filename: display_name(path),
        text,
    })
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
