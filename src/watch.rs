//! Watch mode.
//!
//! File system events from `notify` are turned into [`Trigger`]s and sent
//! over a channel. A single loop consumes them: it waits for one trigger,
//! lets a short burst settle, drains everything queued and runs one
//! incremental pass. Triggers arriving during a pass wait in the channel
//! and are coalesced into the next pass, so passes never overlap.

use crate::builder::Builder;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::events::{BuildMode, EventSink};
use notify::event::{MetadataKind, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

/// Quiet period collecting a burst of events into one pass.
pub const DEBOUNCE: Duration = Duration::from_millis(150);

/// A request for one incremental build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    ContentChanged(PathBuf),
    ContentAdded(PathBuf),
}

impl Trigger {
    pub fn path(&self) -> &Path {
        match self {
            Trigger::ContentChanged(path) | Trigger::ContentAdded(path) => path,
        }
    }
}

/// Editor swap files, backups and hidden files.
pub fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bak" | "swp" | "swo" | "swx" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Maps a file system event to build triggers. Events that neither add
/// nor change content are ignored.
pub fn classify(event: &Event) -> Vec<Trigger> {
    let make: fn(PathBuf) -> Trigger = match event.kind {
        // FSEvents reports renames without a direction.
        EventKind::Create(_)
        | EventKind::Modify(ModifyKind::Name(RenameMode::To))
        | EventKind::Modify(ModifyKind::Name(RenameMode::Any)) => Trigger::ContentAdded,
        EventKind::Modify(ModifyKind::Data(_))
        | EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime))
        | EventKind::Modify(ModifyKind::Any)
        | EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => Trigger::ContentChanged,
        _ => return Vec::new(),
    };

    event
        .paths
        .iter()
        .filter(|path| !is_temp_file(path))
        .cloned()
        .map(make)
        .collect()
}

/// Blocks until a trigger arrives, then collects every trigger that follows
/// within the debounce window.
///
/// # Returns
/// * `None` once every sender is gone and the queue is empty
pub fn next_batch(rx: &Receiver<Trigger>, debounce: Duration) -> Option<Vec<Trigger>> {
    let mut batch = vec![rx.recv().ok()?];
    loop {
        match rx.recv_timeout(debounce) {
            Ok(trigger) => batch.push(trigger),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Some(batch)
}

/// Runs `on_batch` once per coalesced batch until the channel closes.
pub fn run_trigger_loop<F>(rx: &Receiver<Trigger>, debounce: Duration, mut on_batch: F)
where
    F: FnMut(&[Trigger]),
{
    while let Some(batch) = next_batch(rx, debounce) {
        on_batch(&batch);
    }
}

/// Directories whose changes trigger a rebuild.
pub fn watch_paths(config: &SiteConfig) -> Vec<PathBuf> {
    [&config.content_dir, &config.templates_dir, &config.static_dir]
        .into_iter()
        .filter(|dir| dir.is_dir())
        .cloned()
        .collect()
}

/// Watches the site and runs an incremental pass for every batch of
/// changes. Runs until the watcher stops delivering events.
///
/// # Errors
/// * `Error::WatchError` if the watcher cannot be created or attached
pub fn watch(config: &SiteConfig, sink: &dyn EventSink) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            for trigger in classify(&event) {
                let _ = tx.send(trigger);
            }
        }
        Err(e) => log::warn!("Watch error: {e}"),
    })?;

    for path in watch_paths(config) {
        watcher.watch(&path, RecursiveMode::Recursive)?;
        log::debug!("Watching {}", path.display());
    }
    log::info!("Initial build complete. Watching for changes...");

    let builder = Builder::new(config, sink);
    run_trigger_loop(&rx, DEBOUNCE, |batch| {
        for trigger in batch {
            match trigger {
                Trigger::ContentChanged(path) => log::info!("File changed: {}", path.display()),
                Trigger::ContentAdded(path) => log::info!("File added: {}", path.display()),
            }
        }
        if let Err(e) = builder.run(BuildMode::Incremental) {
            log::error!("Build failed: {e}");
        }
    });
    Ok(())
}
