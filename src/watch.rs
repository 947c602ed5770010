//! Recompute-on-change file watching.
//!
//! The parent directory is watched rather than the file itself, since most
//! editors save by replacing the file. Bursts of events collapse into one
//! reload after a quiet period.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{Error, Result};

const IDLE_WAIT: Duration = Duration::from_secs(3600);

pub type WatchEvent = notify::Result<notify::Event>;

/// Call `reload` once up front and again after every debounced change to
/// `path`. Returns when `reload` breaks or the watcher goes away.
pub fn watch_file<F>(path: &Path, debounce: Duration, mut reload: F) -> Result<()>
where
    F: FnMut() -> ControlFlow<()>,
{
    let target = absolute(path)?;
    let dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (event_tx, event_rx) = mpsc::channel();
    let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res: WatchEvent| {
        let _ = event_tx.send(res);
    })
    .map_err(|err| watch_error(&target, err))?;
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|err| watch_error(&target, err))?;

    tracing::debug!(path = %target.display(), ?debounce, "watching input");

    if reload().is_break() {
        return Ok(());
    }
    debounce_loop(&event_rx, debounce, |event| touches(event, &target), reload);
    Ok(())
}

/// Drain `events`, calling `reload` once per burst of relevant events.
pub fn debounce_loop<P, F>(
    events: &Receiver<WatchEvent>,
    debounce: Duration,
    relevant: P,
    mut reload: F,
) where
    P: Fn(&notify::Event) -> bool,
    F: FnMut() -> ControlFlow<()>,
{
    let mut pending: Option<Instant> = None;

    loop {
        let timeout = pending
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);
        match events.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                if relevant(&event) {
                    pending = Some(Instant::now() + debounce);
                }
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "watch error");
            }
            Err(RecvTimeoutError::Timeout) => {
                if pending.take().is_some() && reload().is_break() {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if pending.is_some() {
                    let _ = reload();
                }
                break;
            }
        }
    }
}

fn touches(event: &notify::Event, target: &Path) -> bool {
    if event.kind.is_access() {
        return false;
    }
    event.paths.iter().any(|path| path == target)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

fn watch_error(path: &Path, err: notify::Error) -> Error {
    Error::Watch {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, EventKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> WatchEvent {
        Ok(notify::Event::new(kind).add_path(PathBuf::from(path)))
    }

    #[test]
    fn burst_collapses_into_one_reload() {
        let (tx, rx) = mpsc::channel();
        for _ in 0..5 {
            tx.send(event(EventKind::Modify(ModifyKind::Any), "/tmp/board.json"))
                .expect("send");
        }

        let handle = std::thread::spawn(move || {
            let mut reloads = 0;
            debounce_loop(
                &rx,
                Duration::from_millis(20),
                |event| touches(event, Path::new("/tmp/board.json")),
                || {
                    reloads += 1;
                    ControlFlow::Break(())
                },
            );
            reloads
        });

        assert_eq!(handle.join().expect("join"), 1);
        drop(tx);
    }

    #[test]
    fn unrelated_paths_and_reads_are_ignored() {
        let target = Path::new("/tmp/board.json");
        let other = notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/tmp/other.json"));
        let read = notify::Event::new(EventKind::Access(AccessKind::Any))
            .add_path(target.to_path_buf());
        let write = notify::Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(target.to_path_buf());

        assert!(!touches(&other, target));
        assert!(!touches(&read, target));
        assert!(touches(&write, target));
    }

    #[test]
    fn disconnect_flushes_pending_reload() {
        let (tx, rx) = mpsc::channel();
        tx.send(event(EventKind::Modify(ModifyKind::Any), "/tmp/board.json"))
            .expect("send");
        drop(tx);

        let mut reloads = 0;
        debounce_loop(
            &rx,
            Duration::from_secs(60),
            |_| true,
            || {
                reloads += 1;
                ControlFlow::Continue(())
            },
        );
        assert_eq!(reloads, 1);
    }
}
