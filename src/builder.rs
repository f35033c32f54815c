//! Build orchestration.
//!
//! A pass runs these stages in order: cleaning (full builds only), root
//! static assets, project assets, image indexing, document rendering and
//! the landing page. Failures local to one document or one file are
//! reported through the event sink and the pass continues; a
//! `StructuralError` aborts it.

use crate::assets::{copy_project_assets, copy_root_assets, publish_siblings, CopyReport};
use crate::config::SiteConfig;
use crate::constants::ASSETS_DIR;
use crate::document::read_document;
use crate::error::{Error, Result};
use crate::events::{BuildEvent, BuildMode, BuildStage, EventSink};
use crate::indexer::{collect_project_images, ProjectEntry};
use crate::landing::{tile_count, write_landing_page};
use crate::markdown::MarkdownRenderer;
use crate::path::{is_document, is_root_document, resolve_output_path};
use crate::template::{compose_page, MiniJinjaRenderer, TemplateRenderer};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of a completed build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub mode: BuildMode,
    pub documents_rendered: usize,
    pub documents_failed: usize,
    pub assets: CopyReport,
    pub projects_indexed: usize,
    pub landing_tiles: usize,
}

impl BuildReport {
    fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            documents_rendered: 0,
            documents_failed: 0,
            assets: CopyReport::default(),
            projects_indexed: 0,
            landing_tiles: 0,
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

/// Runs build passes for one site.
pub struct Builder<'a> {
    config: &'a SiteConfig,
    sink: &'a dyn EventSink,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a SiteConfig, sink: &'a dyn EventSink) -> Self {
        Self { config, sink }
    }

    fn enter(&self, stage: BuildStage) {
        self.sink.emit(BuildEvent::StageEntered(stage));
    }

    /// Runs one complete build pass.
    ///
    /// # Errors
    /// * `Error::StructuralError` if the content root is missing or
    ///   unreadable, or a root-level directory cannot be listed
    /// * `Error::IoError` if the output tree cannot be cleaned or the
    ///   landing page cannot be written
    pub fn run(&self, mode: BuildMode) -> Result<BuildReport> {
        let config = self.config;
        let mut report = BuildReport::new(mode);
        debug!("Starting {mode} build of {}", config.content_dir.display());

        if mode == BuildMode::Full {
            self.enter(BuildStage::Cleaning);
            self.clean_output()?;
        }
        self.check_content_root()?;
        fs::create_dir_all(&config.output_dir)?;

        self.enter(BuildStage::CopyingRootAssets);
        report.assets += copy_root_assets(&config.static_dir, &config.output_dir, self.sink)?;

        self.enter(BuildStage::CopyingProjectAssets);
        report.assets += copy_project_assets(
            &config.projects_dir(),
            &config.output_dir.join(ASSETS_DIR),
            self.sink,
        )?;

        self.enter(BuildStage::IndexingImages);
        let projects = collect_project_images(&config.content_dir, self.sink)?;
        report.projects_indexed = projects.len();

        self.enter(BuildStage::RenderingDocuments);
        self.render_documents(&mut report)?;

        self.enter(BuildStage::RenderingLandingPage);
        report.landing_tiles = self.render_landing(&projects)?;

        log::info!(
            "Build complete: {} pages, {} failed, {} assets copied",
            report.documents_rendered,
            report.documents_failed,
            report.assets.copied
        );
        Ok(report)
    }

    fn clean_output(&self) -> Result<()> {
        let output_dir = &self.config.output_dir;
        if output_dir.exists() {
            fs::remove_dir_all(output_dir)?;
            self.sink.emit(BuildEvent::OutputCleaned { path: output_dir.clone() });
        }
        Ok(())
    }

    fn check_content_root(&self) -> Result<()> {
        let content_dir = &self.config.content_dir;
        if !content_dir.is_dir() {
            return Err(Error::StructuralError(format!(
                "content directory '{}' does not exist",
                content_dir.display()
            )));
        }
        fs::read_dir(content_dir).map_err(|e| {
            Error::StructuralError(format!("cannot read '{}': {e}", content_dir.display()))
        })?;
        Ok(())
    }

    /// Collects every document below the content root in file-name order.
    /// Unreadable entries below the root are reported and skipped.
    fn find_documents(&self) -> Result<Vec<PathBuf>> {
        let content_dir = &self.config.content_dir;
        let mut documents = Vec::new();

        for entry in WalkDir::new(content_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(Error::StructuralError(format!(
                        "cannot read '{}': {e}",
                        content_dir.display()
                    )));
                }
                Err(e) => {
                    let document = e.path().unwrap_or(content_dir).to_path_buf();
                    self.sink.emit(BuildEvent::DocumentFailed { document, reason: e.to_string() });
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_document(entry.path()) {
                continue;
            }
            let relative = entry.path().strip_prefix(content_dir).unwrap_or(entry.path());
            if is_root_document(relative) {
                debug!("Skipping root document, replaced by the landing page");
                continue;
            }
            documents.push(entry.into_path());
        }
        Ok(documents)
    }

    fn render_documents(&self, report: &mut BuildReport) -> Result<()> {
        let markdown = MarkdownRenderer::default();
        let templates = MiniJinjaRenderer::new(&self.config.templates_dir);

        for document in self.find_documents()? {
            match self.render_document(&document, &markdown, &templates, report) {
                Ok(output) => {
                    report.documents_rendered += 1;
                    self.sink.emit(BuildEvent::DocumentRendered { document, output });
                }
                Err(e) => {
                    report.documents_failed += 1;
                    self.sink.emit(BuildEvent::DocumentFailed { document, reason: e.to_string() });
                }
            }
        }
        Ok(())
    }

    /// Renders one document and publishes its sibling files.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the written page
    fn render_document(
        &self,
        path: &Path,
        markdown: &MarkdownRenderer,
        templates: &dyn TemplateRenderer,
        report: &mut BuildReport,
    ) -> Result<PathBuf> {
        let config = self.config;
        let record = read_document(&config.content_dir, path)?;

        let rendered = markdown.render(&record.body);
        for fallback in rendered.fallbacks {
            self.sink.emit(BuildEvent::EmbedFallback {
                document: path.to_path_buf(),
                reason: fallback.to_string(),
            });
        }

        let output = config.output_dir.join(resolve_output_path(&record.relative_path));
        let output_dir = output.parent().unwrap_or(&config.output_dir);
        fs::create_dir_all(output_dir)?;

        if let Some(document_dir) = path.parent() {
            report.assets += publish_siblings(document_dir, output_dir, self.sink);
        }

        let page = compose_page(templates, &record, rendered.html)?;
        write_file(&output, &page)?;
        Ok(output)
    }

    fn render_landing(&self, projects: &[ProjectEntry]) -> Result<usize> {
        let path = write_landing_page(&self.config.output_dir, projects, &self.config.landing)?;
        let tiles = tile_count(projects);
        self.sink.emit(BuildEvent::LandingPageWritten { path, tiles });
        Ok(tiles)
    }
}
