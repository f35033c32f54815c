//! Common constants used throughout folio.

/// Supported site configuration file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["site.json", "site.yml", "site.yaml"];

/// Base name of the document that represents its directory's own page
pub const PRIMARY_DOCUMENT_NAME: &str = "index";

/// Extension of content documents
pub const DOCUMENT_EXTENSION: &str = "md";

/// Output file name every page is written to
pub const OUTPUT_INDEX_FILE: &str = "index.html";

/// Large video formats never copied into the output tree
pub const SKIPPED_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "wmv"];

/// Title used when a document does not declare one
pub const DEFAULT_TITLE: &str = "Untitled";

/// Template used when a document does not select one
pub const DEFAULT_TEMPLATE: &str = "page";

/// Extension appended to a template name to find its file
pub const TEMPLATE_EXTENSION: &str = "html";

/// Content subtree holding one directory per project
pub const PROJECTS_DIR: &str = "projects";

/// Output directory receiving static and per-project assets
pub const ASSETS_DIR: &str = "assets";

/// Delimiter line opening and closing a front-matter block
pub const FRONT_MATTER_DELIMITER: &str = "---";
