use std::fs;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use walkdir::WalkDir;

use crate::cli::{CorpusArgs, RoundTripReport, run_roundtrip};

#[derive(Debug, Serialize)]
struct CorpusSummary {
    files: usize,
    passed: usize,
    failed: usize,
    skipped_empty: usize,
    total_original: usize,
    total_compressed: usize,
    reports: Vec<RoundTripReport>,
}

pub fn corpus(args: CorpusArgs) -> Result<()> {
    if !args.dir.is_dir() {
        bail!("corpus directory {} not found", args.dir.display());
    }

    let mut summary = CorpusSummary {
        files: 0,
        passed: 0,
        failed: 0,
        skipped_empty: 0,
        total_original: 0,
        total_compressed: 0,
        reports: Vec::new(),
    };

    for entry in WalkDir::new(&args.dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let input = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        if input.is_empty() {
            // the container cannot represent empty files
            summary.skipped_empty += 1;
            continue;
        }

        let report = run_roundtrip(path, &input);
        if !args.json {
            report.print();
        }

        summary.files += 1;
        if report.passed {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        summary.total_original += report.original_len;
        summary.total_compressed += report.compressed_len;
        summary.reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        eprintln!(
            "{} files: {} passed, {} failed, {} empty skipped; {} -> {} bytes",
            summary.files, summary.passed, summary.failed, summary.skipped_empty, summary.total_original, summary.total_compressed
        );
    }

    if summary.failed > 0 {
        bail!("{} of {} files failed the roundtrip", summary.failed, summary.files);
    }
    Ok(())
}
