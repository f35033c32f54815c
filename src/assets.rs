//! Asset publishing: copies non-document files into the output tree.

use crate::constants::{ASSETS_DIR, SKIPPED_VIDEO_EXTENSIONS};
use crate::error::{Error, Result};
use crate::events::{BuildEvent, EventSink};
use crate::path::is_document;
use std::fs;
use std::ops::AddAssign;
use std::path::Path;
use walkdir::WalkDir;

/// Counts of files handled by one copy operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl AddAssign for CopyReport {
    fn add_assign(&mut self, other: Self) {
        self.copied += other.copied;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Returns true for large video files that are never published.
pub fn is_skipped_video<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SKIPPED_VIDEO_EXTENSIONS.iter().any(|video| ext.eq_ignore_ascii_case(video))
        })
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest).map(|_| ()).map_err(|e| Error::AssetCopyError {
        path: source.display().to_string(),
        reason: e.to_string(),
    })
}

/// Copies one file unless it is a skipped video, reporting the outcome.
fn publish_file(source: &Path, dest: &Path, sink: &dyn EventSink, report: &mut CopyReport) {
    if is_skipped_video(source) {
        sink.emit(BuildEvent::AssetSkipped { path: source.to_path_buf() });
        report.skipped += 1;
        return;
    }

    match copy_file(source, dest) {
        Ok(()) => {
            sink.emit(BuildEvent::AssetCopied { from: source.to_path_buf(), to: dest.to_path_buf() });
            report.copied += 1;
        }
        Err(e) => {
            sink.emit(BuildEvent::AssetCopyFailed { path: source.to_path_buf(), reason: e.to_string() });
            report.failed += 1;
        }
    }
}

/// Copies the regular, non-document files directly inside `source_dir`
/// into `target_dir`. Every file is copied independently; failures are
/// reported and skipped.
fn publish_flat(source_dir: &Path, target_dir: &Path, sink: &dyn EventSink) -> CopyReport {
    let mut report = CopyReport::default();

    let entries = match fs::read_dir(source_dir) {
        Ok(entries) => entries,
        Err(e) => {
            sink.emit(BuildEvent::AssetCopyFailed {
                path: source_dir.to_path_buf(),
                reason: e.to_string(),
            });
            report.failed += 1;
            return report;
        }
    };

    let mut files: Vec<_> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                sink.emit(BuildEvent::AssetCopyFailed {
                    path: source_dir.to_path_buf(),
                    reason: e.to_string(),
                });
                report.failed += 1;
                None
            }
        })
        .filter(|path| path.is_file() && !is_document(path))
        .collect();
    files.sort();

    for source in files {
        if let Some(name) = source.file_name() {
            publish_file(&source, &target_dir.join(name), sink, &mut report);
        }
    }
    report
}

/// Copies the sibling files of a document into the document's output
/// directory.
///
/// # Arguments
/// * `document_dir` - Directory containing the document
/// * `target_dir` - Output directory the document's page is written to
/// * `sink` - Receives one event per copied, skipped or failed file
pub fn publish_siblings(document_dir: &Path, target_dir: &Path, sink: &dyn EventSink) -> CopyReport {
    publish_flat(document_dir, target_dir, sink)
}

/// Recursively copies `source_dir` into `target_dir`, skipping videos.
pub fn copy_tree(source_dir: &Path, target_dir: &Path, sink: &dyn EventSink) -> CopyReport {
    let mut report = CopyReport::default();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(source_dir).to_path_buf();
                sink.emit(BuildEvent::AssetCopyFailed { path, reason: e.to_string() });
                report.failed += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        publish_file(entry.path(), &target_dir.join(relative), sink, &mut report);
    }
    report
}

/// Copies the site's static files: top-level files of `static_dir` land in
/// the output root and its `assets/` folder is copied recursively.
///
/// A missing static directory is not an error.
///
/// # Errors
/// * `Error::StructuralError` if `static_dir` exists but cannot be listed
pub fn copy_root_assets(static_dir: &Path, output_dir: &Path, sink: &dyn EventSink) -> Result<CopyReport> {
    if !static_dir.exists() {
        log::debug!("No static directory at {}", static_dir.display());
        return Ok(CopyReport::default());
    }
    fs::read_dir(static_dir).map_err(|e| {
        Error::StructuralError(format!("cannot read {}: {e}", static_dir.display()))
    })?;

    let mut report = publish_flat(static_dir, output_dir, sink);
    let assets = static_dir.join(ASSETS_DIR);
    if assets.is_dir() {
        report += copy_tree(&assets, &output_dir.join(ASSETS_DIR), sink);
    }
    Ok(report)
}

/// Copies the non-document files of every project directory into
/// `assets_dir/<project>/`, where landing page image paths point.
///
/// # Errors
/// * `Error::StructuralError` if `projects_dir` exists but cannot be listed
pub fn copy_project_assets(projects_dir: &Path, assets_dir: &Path, sink: &dyn EventSink) -> Result<CopyReport> {
    let mut report = CopyReport::default();
    if !projects_dir.exists() {
        log::debug!("No projects directory at {}", projects_dir.display());
        return Ok(report);
    }

    for project in project_dirs(projects_dir)? {
        if let Some(name) = project.file_name() {
            report += publish_flat(&project, &assets_dir.join(name), sink);
        }
    }
    Ok(report)
}

/// Lists the project directories under `projects_dir` in file-name order.
///
/// # Errors
/// * `Error::StructuralError` if the directory cannot be listed
pub fn project_dirs(projects_dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let entries = fs::read_dir(projects_dir).map_err(|e| {
        Error::StructuralError(format!("cannot read {}: {e}", projects_dir.display()))
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::StructuralError(format!("cannot read {}: {e}", projects_dir.display()))
        })?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}
