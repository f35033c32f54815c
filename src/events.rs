//! Build events.
//!
//! Pipeline stages report progress and local failures as [`BuildEvent`]s
//! sent to an [`EventSink`] instead of printing directly. [`LogSink`] is
//! used by the binary; [`EventCollector`] keeps events for inspection.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Whether a pass starts from a clean output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Remove the previous output tree first
    Full,
    /// Overwrite in place, leaving unrelated output files alone
    Incremental,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Full => write!(f, "full"),
            BuildMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// Stages of a build pass, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Cleaning,
    CopyingRootAssets,
    CopyingProjectAssets,
    IndexingImages,
    RenderingDocuments,
    RenderingLandingPage,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Cleaning => "cleaning output",
            BuildStage::CopyingRootAssets => "copying static assets",
            BuildStage::CopyingProjectAssets => "copying project assets",
            BuildStage::IndexingImages => "indexing project images",
            BuildStage::RenderingDocuments => "rendering documents",
            BuildStage::RenderingLandingPage => "rendering landing page",
        };
        f.write_str(name)
    }
}

/// Something that happened during a build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    StageEntered(BuildStage),
    OutputCleaned { path: PathBuf },
    AssetCopied { from: PathBuf, to: PathBuf },
    /// Large video file left out of the output tree
    AssetSkipped { path: PathBuf },
    AssetCopyFailed { path: PathBuf, reason: String },
    ProjectSkipped { project: String, reason: String },
    /// Video reference rendered as a plain image
    EmbedFallback { document: PathBuf, reason: String },
    DocumentRendered { document: PathBuf, output: PathBuf },
    DocumentFailed { document: PathBuf, reason: String },
    LandingPageWritten { path: PathBuf, tiles: usize },
}

impl BuildEvent {
    /// Writes the event to the `log` facade at a level matching its severity.
    pub fn log(&self) {
        match self {
            BuildEvent::StageEntered(stage) => log::debug!("Stage: {stage}"),
            BuildEvent::OutputCleaned { path } => log::info!("Cleaned {}", path.display()),
            BuildEvent::AssetCopied { from, to } => {
                log::debug!("Copied {} -> {}", from.display(), to.display())
            }
            BuildEvent::AssetSkipped { path } => {
                log::info!("Skipping large video file: {}", path.display())
            }
            BuildEvent::AssetCopyFailed { path, reason } => {
                log::warn!("Could not copy {}: {reason}", path.display())
            }
            BuildEvent::ProjectSkipped { project, reason } => {
                log::debug!("Skipping project '{project}': {reason}")
            }
            BuildEvent::EmbedFallback { document, reason } => {
                log::warn!("{}: {reason}, rendering as image", document.display())
            }
            BuildEvent::DocumentRendered { output, .. } => {
                log::info!("Generated: {}", output.display())
            }
            BuildEvent::DocumentFailed { document, reason } => {
                log::error!("Skipped {}: {reason}", document.display())
            }
            BuildEvent::LandingPageWritten { path, tiles } => {
                log::info!("Generated: {} ({tiles} tiles)", path.display())
            }
        }
    }
}

/// Receiver of build events.
pub trait EventSink {
    fn emit(&self, event: BuildEvent);
}

/// Forwards every event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: BuildEvent) {
        event.log();
    }
}

/// Logs and records every event.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Mutex<Vec<BuildEvent>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<BuildEvent> {
        self.events.lock().map(|mut events| std::mem::take(&mut *events)).unwrap_or_default()
    }
}

impl EventSink for EventCollector {
    fn emit(&self, event: BuildEvent) {
        event.log();
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
