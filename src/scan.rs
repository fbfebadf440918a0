//! File discovery and per-file code block reports.

use crate::blocks::{CodeBlock, extract_code_blocks};
use crate::config::Config;
use ignore::WalkBuilder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while collecting files to scan
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
}

/// Code blocks of one document, languages already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub blocks: Vec<CodeBlock>,
}

/// Extract and normalize the code blocks of `content`.
pub fn scan_content(path: &str, content: &str, config: &Config) -> FileReport {
    let blocks = extract_code_blocks(content)
        .into_iter()
        .map(|mut block| {
            block.language = config.normalize_language.apply(block.language);
            block
        })
        .collect();

    FileReport {
        path: path.to_string(),
        blocks,
    }
}

/// Read and scan a single file.
pub fn scan_file(path: &Path, config: &Config) -> Result<FileReport, ScanError> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(scan_content(&path.display().to_string(), &content, config))
}

/// Expand `paths` into the documents to scan.
///
/// Explicit file paths are always kept; files found while walking a directory
/// must match one of the configured extensions. `.gitignore` rules apply to
/// directory walks.
pub fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    for root in paths {
        if !root.exists() {
            return Err(ScanError::NotFound(root.display().to_string()));
        }

        let walker = WalkBuilder::new(root).hidden(true).git_ignore(true).require_git(false).build();
        for entry in walker {
            let entry = entry?;
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if !is_file {
                continue;
            }
            if entry.depth() == 0 || config.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    log::debug!("Collected {} files to scan", files.len());
    Ok(files)
}

/// Scan every document under `paths`. Unreadable files are skipped with a warning.
pub fn scan_paths(paths: &[PathBuf], config: &Config) -> Result<Vec<FileReport>, ScanError> {
    let files = collect_files(paths, config)?;
    let mut reports = Vec::with_capacity(files.len());

    for file in &files {
        match scan_file(file, config) {
            Ok(report) => reports.push(report),
            Err(e) => log::warn!("{e}"),
        }
    }

    Ok(reports)
}
