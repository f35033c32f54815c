//! Project image indexing for the landing page.

use crate::assets::project_dirs;
use crate::constants::{ASSETS_DIR, DOCUMENT_EXTENSION, PRIMARY_DOCUMENT_NAME, PROJECTS_DIR};
use crate::document::{metadata_string, read_document};
use crate::error::Result;
use crate::events::{BuildEvent, EventSink};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;
use url::Url;

static IMAGE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\((.*?)\)").expect("valid regex"));

/// One project directory and the images its page references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectEntry {
    /// Project directory name
    pub identifier: String,
    pub title: String,
    /// Absolute asset paths or external URLs, in source order
    pub images: Vec<String>,
    pub url: String,
}

/// Rewrites an image reference found in a project's page into a path that
/// resolves from the site root.
///
/// # Example
/// ```
/// use folio::indexer::normalize_image_path;
///
/// assert_eq!(normalize_image_path("lamp", "./a.png"), "/assets/lamp/a.png");
/// assert_eq!(normalize_image_path("lamp", "https://ext.example/b.png"), "https://ext.example/b.png");
/// ```
pub fn normalize_image_path(project: &str, reference: &str) -> String {
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    let relative = reference
        .strip_prefix("./")
        .unwrap_or(reference)
        .trim_start_matches('/');
    format!("/{ASSETS_DIR}/{project}/{relative}")
}

/// Extracts every image reference of a Markdown body, in order. An
/// optional quoted image title after the source is dropped.
pub fn extract_image_references(body: &str) -> Vec<&str> {
    IMAGE_REFERENCE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().split_whitespace().next())
        .collect()
}

/// Scans `content_root/projects` one level deep and returns every project
/// with at least one image, in directory name order.
///
/// Projects whose primary document is missing or unparsable are skipped
/// with a `ProjectSkipped` event. A missing projects directory yields an
/// empty index.
///
/// # Errors
/// * `Error::StructuralError` if the projects directory cannot be listed
pub fn collect_project_images(content_root: &Path, sink: &dyn EventSink) -> Result<Vec<ProjectEntry>> {
    let projects_dir = content_root.join(PROJECTS_DIR);
    if !projects_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for dir in project_dirs(&projects_dir)? {
        let Some(identifier) = dir.file_name().map(|name| name.to_string_lossy().into_owned()) else {
            continue;
        };
        let document = dir.join(format!("{PRIMARY_DOCUMENT_NAME}.{DOCUMENT_EXTENSION}"));
        let record = match read_document(content_root, &document) {
            Ok(record) => record,
            Err(e) => {
                sink.emit(BuildEvent::ProjectSkipped { project: identifier, reason: e.to_string() });
                continue;
            }
        };

        let images: Vec<String> = extract_image_references(&record.body)
            .into_iter()
            .map(|reference| normalize_image_path(&identifier, reference))
            .collect();
        if images.is_empty() {
            sink.emit(BuildEvent::ProjectSkipped {
                project: identifier,
                reason: "no images".to_string(),
            });
            continue;
        }

        entries.push(ProjectEntry {
            title: metadata_string(&record.metadata, "title").unwrap_or_else(|| identifier.clone()),
            url: format!("/{PROJECTS_DIR}/{identifier}/"),
            identifier,
            images,
        });
    }
    Ok(entries)
}
