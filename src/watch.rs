//! File system watcher for incremental rebuilds.
//!
//! Monitors the template and data roots and calls [`rebuild`] for every
//! change that passes the debounce gate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         Event Loop                               │
//! │                                                                  │
//! │  ┌──────────┐   ┌──────────────┐   ┌───────────┐   ┌──────────┐  │
//! │  │ notify   │──▶│ first path,  │──▶│ Debouncer │──▶│ rebuild  │  │
//! │  │ events   │   │ root + temp  │   │  admit()  │   │ (sync)   │  │
//! │  └──────────┘   │ file filter  │   └───────────┘   └──────────┘  │
//! │                 └──────────────┘                                 │
//! │  ┌──────────┐                                                    │
//! │  │ Ctrl+C   │──▶ set flag + Shutdown: leave loop, drop watcher   │
//! │  └──────────┘                                                    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events and the rebuilds they trigger are handled one at a time on the
//! calling thread, in delivery order. Events dropped by the debouncer are
//! gone; nothing is queued for later. Once Ctrl+C is pressed, events still
//! queued behind the running rebuild are discarded.

use crate::{
    build::{BuildReport, rebuild},
    config::SiteConfig,
    log,
    utils::fs::{normalize_path, rel_display},
};
use anyhow::{Context, Result, bail};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
    },
    time::{Duration, Instant},
};

// =============================================================================
// Event Paths
// =============================================================================

/// Paths carried by one file system event.
///
/// Directory-level events may carry several paths; the watcher always reduces
/// them to the first one so the debouncer sees a single, stable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPaths {
    Single(PathBuf),
    Multi(Vec<PathBuf>),
}

impl EventPaths {
    pub fn from_paths(mut paths: Vec<PathBuf>) -> Option<Self> {
        match paths.len() {
            0 => None,
            1 => paths.pop().map(Self::Single),
            _ => Some(Self::Multi(paths)),
        }
    }

    /// The path that stands for the whole event.
    pub fn representative(&self) -> Option<&Path> {
        match self {
            Self::Single(path) => Some(path),
            Self::Multi(paths) => paths.first().map(PathBuf::as_path),
        }
    }
}

// =============================================================================
// Debounce State
// =============================================================================

/// Drops repeated events on the same path within `delay` of the last
/// admitted one.
///
/// Only admitted events update the state, so a steady stream of events on one
/// path is admitted once per `delay`. An event on a different path is always
/// admitted.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    last_path: Option<PathBuf>,
    last_time: Option<Instant>,
}

impl Debouncer {
    pub const fn new(delay: Duration) -> Self {
        Self { delay, last_path: None, last_time: None }
    }

    pub fn admit(&mut self, path: &Path, now: Instant) -> bool {
        let same_path = self.last_path.as_deref() == Some(path);
        let elapsed = self
            .last_time
            .map_or(Duration::MAX, |t| now.saturating_duration_since(t));

        if !same_path || elapsed > self.delay {
            self.last_time = Some(now);
            self.last_path = Some(path.to_path_buf());
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Absolute, canonical form of an event path.
///
/// Removed files cannot be canonicalized, so their parent is resolved instead
/// to keep them comparable with the (canonical) watched roots.
fn normalize_event_path(path: &Path) -> PathBuf {
    if let Ok(path) = path.canonicalize() {
        return path;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => normalize_path(parent).join(name),
        _ => normalize_path(path),
    }
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Event Handler
// =============================================================================

/// Turns file system events into rebuilds.
pub struct ChangeWatcher<'a> {
    config: &'a SiteConfig,
    roots: [&'a Path; 2],
    debouncer: Debouncer,
}

impl<'a> ChangeWatcher<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            roots: [&config.build.templates, &config.build.data],
            debouncer: Debouncer::new(config.watch.debounce_delay()),
        }
    }

    /// Handle one event. Returns the report when a rebuild ran.
    pub fn handle_event(&mut self, event: Event, now: Instant) -> Option<BuildReport> {
        if !is_relevant(&event) {
            return None;
        }
        let paths = EventPaths::from_paths(event.paths)?;
        let path = normalize_event_path(paths.representative()?);

        if is_temp_file(&path) || !self.is_watched(&path) {
            return None;
        }
        if !self.debouncer.admit(&path, now) {
            return None;
        }
        Some(rebuild(self.config, Some(&path)))
    }

    fn is_watched(&self, path: &Path) -> bool {
        self.roots.iter().any(|root| path.starts_with(root))
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

enum WatchMessage {
    Fs(notify::Result<Event>),
    Shutdown,
}

/// Subscribe to every existing source root. Fails if none exists.
fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut watched = Vec::new();

    for (name, path) in [("templates", &config.build.templates), ("data", &config.build.data)] {
        if !path.is_dir() {
            log!("watch"; "skipping {name}: {} not found", rel_display(path, root));
            continue;
        }
        watcher
            .watch(path, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {name}: {}", path.display()))?;
        watched.push(format!("{}/", rel_display(path, root)));
    }

    if watched.is_empty() {
        bail!("nothing to watch: neither the template nor the data directory exists");
    }

    log!("watch"; "watching {} (Ctrl+C to stop)", watched.join(", "));
    Ok(())
}

// =============================================================================
// Public API
// =============================================================================

/// Watch the source roots and rebuild on change until Ctrl+C.
pub fn watch_for_changes_blocking(config: &SiteConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let fs_tx = tx.clone();
    let mut watcher = notify::recommended_watcher(move |res| {
        fs_tx.send(WatchMessage::Fs(res)).ok();
    })
    .context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        tx.send(WatchMessage::Shutdown).ok();
    })
    .context("Failed to set Ctrl+C handler")?;

    let mut handler = ChangeWatcher::new(config);
    run_event_loop(&rx, &shutdown, &mut handler);

    drop(watcher);
    Ok(())
}

/// Handle messages until shutdown. Returns the number of rebuilds run.
///
/// `shutdown` is checked before every message, so a Ctrl+C pressed during a
/// rebuild skips whatever queued up behind it.
fn run_event_loop(
    rx: &Receiver<WatchMessage>,
    shutdown: &AtomicBool,
    handler: &mut ChangeWatcher<'_>,
) -> usize {
    let mut rebuilds = 0;

    for message in rx {
        if shutdown.load(Ordering::SeqCst) || matches!(message, WatchMessage::Shutdown) {
            log!("watch"; "shutting down...");
            break;
        }
        match message {
            WatchMessage::Fs(Ok(event)) => {
                if handler.handle_event(event, Instant::now()).is_some() {
                    rebuilds += 1;
                }
            }
            WatchMessage::Fs(Err(e)) => log!("watch"; "error: {e}"),
            WatchMessage::Shutdown => {}
        }
    }

    rebuilds
}
