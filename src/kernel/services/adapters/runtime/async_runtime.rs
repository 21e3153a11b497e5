use super::message::AppMessage;
use crate::kernel::services::ports::VcsProbe;
use crate::kernel::vcs::VcsSnapshot;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

/// Handle to the periodic tick task.
pub struct RefreshLoop {
    handle: JoinHandle<()>,
}

impl RefreshLoop {
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    /// Sends `AppMessage::Tick` every `interval` until stopped or the receiver goes away.
    pub fn start_refresh_loop(&self, interval: Duration) -> RefreshLoop {
        let tx = self.tx.clone();
        let handle = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(AppMessage::Tick).is_err() {
                    tracing::debug!("refresh loop receiver dropped, stopping");
                    break;
                }
            }
        });
        RefreshLoop { handle }
    }

    /// Runs the probe on the blocking pool; the child process never blocks a worker.
    pub fn probe_vcs(&self, probe: Arc<dyn VcsProbe>, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let path_for_probe = path.clone();
            let result =
                tokio::task::spawn_blocking(move || probe.snapshot(&path_for_probe)).await;

            // A failed task still answers so the path is not left pending.
            let snapshot = result.unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "vcs status task failed");
                VcsSnapshot::default()
            });
            let _ = tx.send(AppMessage::VcsProbed { path, snapshot });
        });
    }

    /// Fire-and-forget: waits `delay`, then asks the UI to select `path` in the open-files list.
    pub fn schedule_focus(&self, path: PathBuf, delay: Duration) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppMessage::FocusOpenFile { path });
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
