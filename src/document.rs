//! Document parsing: splits a raw content file into its YAML front matter
//! and Markdown body.

use crate::constants::{DEFAULT_TEMPLATE, DEFAULT_TITLE, FRONT_MATTER_DELIMITER};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Front-matter fields in declaration order.
pub type Metadata = IndexMap<String, serde_json::Value>;

/// A parsed content document, valid for one build pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    /// Path relative to the content root
    pub relative_path: PathBuf,
    pub metadata: Metadata,
    pub body: String,
}

impl DocumentRecord {
    /// Page title, falling back to `"Untitled"`.
    pub fn title(&self) -> String {
        metadata_string(&self.metadata, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Template name, falling back to `"page"`.
    pub fn template(&self) -> String {
        metadata_string(&self.metadata, "template")
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string())
    }
}

/// Reads a scalar metadata field as a non-empty string.
pub fn metadata_string(metadata: &Metadata, key: &str) -> Option<String> {
    let value = match metadata.get(key)? {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!value.is_empty()).then_some(value)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == FRONT_MATTER_DELIMITER
}

/// Splits raw text into an optional front-matter header and the body.
///
/// The header must open on the very first line. A header that is opened
/// but never closed is an error; text without an opening delimiter is
/// returned whole as the body.
///
/// # Errors
/// * `Error::ParseError` without a path if the header is never closed;
///   [`parse_document`] fills in the document path
pub fn split_front_matter(raw: &str) -> Result<(Option<&str>, &str)> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((None, text));
    };
    if !is_delimiter(first) {
        return Ok((None, text));
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if is_delimiter(line) {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((Some(header), body));
        }
        offset += line.len();
    }

    Err(Error::ParseError {
        path: String::new(),
        reason: "unterminated front matter".to_string(),
    })
}

/// Parses front matter YAML into a metadata map.
fn parse_metadata(header: &str) -> std::result::Result<Metadata, String> {
    if header.trim().is_empty() {
        return Ok(Metadata::new());
    }
    let parsed: Option<Metadata> =
        serde_yaml::from_str(header).map_err(|e| format!("invalid front matter: {e}"))?;
    Ok(parsed.unwrap_or_default())
}

/// Parses a raw document.
///
/// # Arguments
/// * `relative_path` - Location of the document under the content root
/// * `raw` - Full file contents
///
/// # Errors
/// * `Error::ParseError` if the front matter is unterminated, invalid YAML
///   or not a mapping
pub fn parse_document<P: AsRef<Path>>(relative_path: P, raw: &str) -> Result<DocumentRecord> {
    let relative_path = relative_path.as_ref();
    let parse_error = |reason: String| Error::ParseError {
        path: relative_path.display().to_string(),
        reason,
    };

    let (header, body) = split_front_matter(raw).map_err(|e| match e {
        Error::ParseError { reason, .. } => parse_error(reason),
        other => other,
    })?;
    let metadata = match header {
        Some(header) => parse_metadata(header).map_err(parse_error)?,
        None => Metadata::new(),
    };

    Ok(DocumentRecord {
        relative_path: relative_path.to_path_buf(),
        metadata,
        body: body.to_string(),
    })
}

/// Reads and parses the document at `path`, recording it relative to
/// `content_root`.
pub fn read_document(content_root: &Path, path: &Path) -> Result<DocumentRecord> {
    let raw = fs::read_to_string(path)?;
    let relative_path = path.strip_prefix(content_root).unwrap_or(path);
    parse_document(relative_path, &raw)
}
