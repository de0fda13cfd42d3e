use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::bookmark::{PreambleMode, parse_document, render_document};
use crate::cli::ValidateArgs;
use crate::commands::source::{SourceDocument, load_sources};
use crate::model::{RoundTripEntry, RoundTripStatus, ValidationReport};
use crate::util::{now_utc_string, write_json_pretty};

/// Checks that every export survives render-and-reparse unchanged.
pub fn run(args: ValidateArgs) -> Result<()> {
    let sources = load_sources(&args.source_dir)?;
    let mode = PreambleMode::from(args.preamble);

    let entries: Vec<RoundTripEntry> = sources
        .documents
        .iter()
        .map(|source| check_round_trip(source, mode))
        .collect();

    let count = |status: RoundTripStatus| {
        entries
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    };
    let report = ValidationReport {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: args.source_dir.display().to_string(),
        preamble: args.preamble.as_str().to_string(),
        passed: count(RoundTripStatus::Pass),
        failed: count(RoundTripStatus::Fail),
        skipped: count(RoundTripStatus::Skipped),
        entries,
        rejected: sources.rejected,
    };

    let report_path = args.report_path.unwrap_or_else(|| {
        args.source_dir
            .join("manifests")
            .join("round_trip_report.json")
    });
    write_json_pretty(&report_path, &report)?;
    info!(
        path = %report_path.display(),
        passed = report.passed,
        failed = report.failed,
        skipped = report.skipped,
        "wrote round-trip report"
    );

    if report.failed > 0 {
        bail!("{} export(s) did not round-trip", report.failed);
    }

    Ok(())
}

fn check_round_trip(source: &SourceDocument, mode: PreambleMode) -> RoundTripEntry {
    let Some(parsed) = parse_document(&source.text, mode) else {
        warn!(file = %source.path.display(), "no folder found in export, skipping");
        return RoundTripEntry {
            filename: source.filename.clone(),
            status: RoundTripStatus::Skipped,
            parsed: None,
            reparsed: None,
        };
    };

    // Rendered output always carries the conventional preamble.
    let reparsed = parse_document(&render_document(&parsed), PreambleMode::Fixed);
    let status = if reparsed.as_ref() == Some(&parsed) {
        RoundTripStatus::Pass
    } else {
        warn!(file = %source.path.display(), "export changed after render and reparse");
        RoundTripStatus::Fail
    };

    RoundTripEntry {
        filename: source.filename.clone(),
        status,
        parsed: Some(parsed.stats()),
        reparsed: reparsed.map(|tree| tree.stats()),
    }
}
