//! folio builds a personal site from structured content folders.
//! It turns a tree of Markdown documents with YAML front matter into a tree
//! of HTML pages, publishes co-located files, rewrites video references
//! into embedded players and assembles an image-grid landing page from the
//! project entries.

/// Co-located and static file publishing
pub mod assets;

/// Build pass orchestration (full and incremental)
pub mod builder;

/// Command-line interface module for the folio binary
pub mod cli;

/// Site configuration (site.json, site.yml, site.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Front matter and body splitting
pub mod document;

/// Video shortcode and image-to-player rewriting
pub mod embed;

/// Error types and handling for folio
pub mod error;

/// Build events and sinks
pub mod events;

/// Project image index for the landing page
pub mod indexer;

/// Aggregate landing page
pub mod landing;

/// Logger setup
pub mod logger;

/// Markdown rendering
pub mod markdown;

/// Output path derivation
pub mod path;

/// Page template composition
pub mod template;

/// Watch mode: file events to incremental rebuilds
pub mod watch;
