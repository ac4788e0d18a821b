//! Rebuild-on-change loop.
//!
//! Filesystem events from `notify` are forwarded into a channel and
//! consumed by a single loop, so at most one build runs at a time. Events
//! that arrive while a build is running queue up and are coalesced into
//! one follow-up build. A failed rebuild is logged and the loop keeps
//! going.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, error, info, warn};

use crate::build::build;
use crate::config::SiteConfig;
use crate::error::DriverError;

/// Something whose changes should trigger a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchTarget {
    /// A directory and everything below it.
    Tree(PathBuf),
    /// A single file.
    ///
    /// The OS watch is placed on the parent directory, so saves that
    /// replace the file (write a temp file, rename it over the original)
    /// keep being seen. Only events naming the file itself count.
    File(PathBuf),
}

impl WatchTarget {
    pub fn recursive(path: impl Into<PathBuf>) -> Self {
        Self::Tree(path.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Directory handed to the OS watcher, and how deep it goes.
    fn watch_root(&self) -> (PathBuf, RecursiveMode) {
        match self {
            Self::Tree(dir) => (absolute(dir), RecursiveMode::Recursive),
            Self::File(file) => (absolute(parent_dir(file)), RecursiveMode::NonRecursive),
        }
    }

    /// Absolute path as it appears in event paths.
    fn resolved(&self) -> PathBuf {
        match self {
            Self::Tree(dir) => absolute(dir),
            Self::File(file) => match file.file_name() {
                Some(name) => absolute(parent_dir(file)).join(name),
                None => absolute(file),
            },
        }
    }
}

fn parent_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Decides which filesystem events count as changes.
///
/// A path counts if it lies under a watched tree or names a watched file,
/// and does not lie under an ignored directory (the output directory, so a
/// build's own writes do not retrigger it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeFilter {
    trees: Vec<PathBuf>,
    files: Vec<PathBuf>,
    ignored: Vec<PathBuf>,
}

impl ChangeFilter {
    pub fn new(targets: &[WatchTarget]) -> Self {
        let mut filter = Self::default();
        for target in targets {
            match target {
                WatchTarget::Tree(_) => filter.trees.push(target.resolved()),
                WatchTarget::File(_) => filter.files.push(target.resolved()),
            }
        }
        filter
    }

    pub fn ignore(mut self, dir: impl AsRef<Path>) -> Self {
        self.ignored.push(absolute(dir.as_ref()));
        self
    }

    /// Whether `event` should trigger a rebuild.
    ///
    /// Access events never do. Events without paths (a rescan request from
    /// the backend) always do.
    pub fn is_relevant(&self, event: &Event) -> bool {
        if event.kind.is_access() {
            return false;
        }
        if event.paths.is_empty() {
            return true;
        }
        event.paths.iter().any(|path| self.admits(path))
    }

    fn admits(&self, path: &Path) -> bool {
        if self.ignored.iter().any(|dir| path.starts_with(dir)) {
            return false;
        }
        self.trees.iter().any(|dir| path.starts_with(dir))
            || self.files.iter().any(|file| path == file)
    }
}

/// Counters returned when the loop shuts down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub builds: usize,
    pub failures: usize,
}

/// Runs one build and reports the outcome instead of returning it.
///
/// Returns `true` on success.
pub async fn rebuild(config: Arc<SiteConfig>) -> bool {
    match tokio::task::spawn_blocking(move || build(&config)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            error!(error = %e, "rebuild failed");
            false
        }
        Err(e) => {
            error!(error = %e, "rebuild task aborted");
            false
        }
    }
}

/// Consumes events until `shutdown` resolves or the channel closes.
pub async fn rebuild_loop<F>(
    config: Arc<SiteConfig>,
    mut events: UnboundedReceiver<Event>,
    filter: ChangeFilter,
    shutdown: F,
) -> WatchStats
where
    F: Future<Output = ()>,
{
    let mut stats = WatchStats::default();
    tokio::pin!(shutdown);

    loop {
        let event = tokio::select! {
            biased;
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
            () = &mut shutdown => break,
        };

        if !filter.is_relevant(&event) {
            continue;
        }
        debug!(kind = ?event.kind, paths = ?event.paths, "change detected");

        // coalesce whatever queued up behind this event
        let mut coalesced = 0;
        while events.try_recv().is_ok() {
            coalesced += 1;
        }
        if coalesced > 0 {
            debug!(coalesced, "coalesced queued events");
        }

        stats.builds += 1;
        if !rebuild(config.clone()).await {
            stats.failures += 1;
        }
    }

    info!(builds = stats.builds, failures = stats.failures, "watch stopped");
    stats
}

/// Attaches a watcher to every target, forwarding events into a channel.
///
/// The returned watcher must be kept alive for events to keep flowing.
///
/// ## Errors
///
/// Returns an error if the watcher cannot be created or a target cannot
/// be watched (for example because it does not exist).
pub fn spawn_watcher(
    targets: &[WatchTarget],
) -> Result<(RecommendedWatcher, UnboundedReceiver<Event>), DriverError> {
    let (tx, rx) = unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            let _ = tx.send(event);
        }
        Err(e) => warn!(error = %e, "file watcher error"),
    })?;

    for target in targets {
        // notify reports paths relative to what was watched
        let (path, mode) = target.watch_root();
        debug!(path = %path.display(), ?mode, "watching");
        watcher.watch(&path, mode)?;
    }
    Ok((watcher, rx))
}

/// Best-effort absolute form of `path` for comparing against event paths.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Builds once, then rebuilds whenever something under `targets` changes.
///
/// Runs until `shutdown` resolves.
///
/// ## Errors
///
/// Returns an error only if the watcher cannot be set up; build failures
/// are logged.
pub async fn run_watch<F>(
    config: SiteConfig,
    targets: Vec<WatchTarget>,
    shutdown: F,
) -> Result<WatchStats, DriverError>
where
    F: Future<Output = ()>,
{
    let config = Arc::new(config);
    rebuild(config.clone()).await;

    let (_watcher, events) = spawn_watcher(&targets)?;
    let filter = ChangeFilter::new(&targets).ignore(&config.out_dir);
    info!(targets = targets.len(), "watching for changes");

    Ok(rebuild_loop(config, events, filter, shutdown).await)
}
