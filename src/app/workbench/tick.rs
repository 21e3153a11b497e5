use super::Workbench;
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::Effect;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

impl Workbench {
    /// Drains pending runtime messages; returns whether a redraw is needed.
    pub fn drain_messages(&mut self, rx: &mpsc::Receiver<AppMessage>) -> bool {
        let mut changed = false;
        for _ in 0..super::MAX_MESSAGE_DRAIN_PER_TICK {
            match rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::debug!("runtime channel disconnected");
                    break;
                }
            }
        }
        changed
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Tick => {
                let output = self.session.tick();
                self.view = output.view;
                for path in output.probe {
                    self.request_probe(path);
                }
                true
            }
            AppMessage::VcsProbed { path, snapshot } => {
                self.probes_in_flight.remove(&path);
                let changed = self.session.apply_vcs(&path, snapshot);
                if changed {
                    self.view = self.session.status_view();
                }
                changed
            }
            AppMessage::FocusOpenFile { path } => self.focus_open_file(&path),
        }
    }

    pub(super) fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeVcs(paths) => {
                    for path in paths {
                        self.request_probe(path);
                    }
                }
                Effect::FocusOpenFile { path, delay } => self.runtime.schedule_focus(path, delay),
                Effect::Quit => {
                    if self.session.config().confirm_exit {
                        self.quit_prompt = true;
                    } else {
                        self.exiting = true;
                    }
                }
            }
        }
    }

    /// A path with a probe still running is skipped; slow git must not pile up children.
    fn request_probe(&mut self, path: PathBuf) {
        if !self.probes_in_flight.insert(path.clone()) {
            tracing::trace!(path = %path.display(), "vcs probe already in flight");
            return;
        }
        self.runtime.probe_vcs(self.vcs.clone(), path);
    }

    fn focus_open_file(&mut self, path: &Path) -> bool {
        match self.session.registry().index_of(path) {
            Some(index) if index != self.open_files_selected => {
                self.open_files_selected = index;
                true
            }
            _ => false,
        }
    }
}
