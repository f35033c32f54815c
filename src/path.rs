//! Output path derivation for content documents.
//!
//! Every page is written as a directory index: `D/index.md` becomes
//! `D/index.html` and `D/name.md` becomes `D/name/index.html`.

use crate::constants::{DOCUMENT_EXTENSION, OUTPUT_INDEX_FILE, PRIMARY_DOCUMENT_NAME};
use std::path::{Component, Path, PathBuf};

/// Returns true when `path` names a content document.
pub fn is_document<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

/// Returns true when `path` is a directory's primary document.
pub fn is_primary_document<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    is_document(path) && path.file_stem().is_some_and(|stem| stem == PRIMARY_DOCUMENT_NAME)
}

/// Returns true for the content root's own primary document, which the
/// landing page replaces.
pub fn is_root_document<P: AsRef<Path>>(relative: P) -> bool {
    let relative = relative.as_ref();
    is_primary_document(relative)
        && relative.parent().map_or(true, |parent| parent.as_os_str().is_empty())
}

/// Resolves a document path relative to the content root into the output
/// file path relative to the output root.
///
/// # Example
/// ```
/// use std::path::PathBuf;
/// use folio::path::resolve_output_path;
///
/// assert_eq!(resolve_output_path("about.md"), PathBuf::from("about/index.html"));
/// assert_eq!(resolve_output_path("projects/a/index.md"), PathBuf::from("projects/a/index.html"));
/// ```
pub fn resolve_output_path<P: AsRef<Path>>(relative: P) -> PathBuf {
    let relative = relative.as_ref();
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));

    if is_primary_document(relative) {
        parent.join(OUTPUT_INDEX_FILE)
    } else {
        let stem = relative.file_stem().unwrap_or_default();
        parent.join(stem).join(OUTPUT_INDEX_FILE)
    }
}

/// Site URL of a document, always ending in `/`.
pub fn page_url<P: AsRef<Path>>(relative: P) -> String {
    let output = resolve_output_path(relative);
    let mut url = String::from("/");
    if let Some(dir) = output.parent() {
        for component in dir.components() {
            if let Component::Normal(part) = component {
                url.push_str(&part.to_string_lossy());
                url.push('/');
            }
        }
    }
    url
}
