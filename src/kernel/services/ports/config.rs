use super::settings::Settings;
use std::time::Duration;

pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100);
pub const VCS_THROTTLE_TICKS: u64 = 10;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub refresh_interval: Duration,
    /// Every n-th tick re-probes all open files instead of just the current one.
    pub vcs_throttle_ticks: u64,
    pub new_file_prefix: String,
    pub show_hidden: bool,
    pub confirm_exit: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            refresh_interval: REFRESH_INTERVAL,
            vcs_throttle_ticks: VCS_THROTTLE_TICKS,
            new_file_prefix: settings.new_file_prefix,
            show_hidden: settings.show_hidden,
            confirm_exit: settings.confirm_exit,
        }
    }
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let prefix = settings.new_file_prefix.trim();
        let defaults = Self::default();
        Self {
            new_file_prefix: if prefix.is_empty() {
                defaults.new_file_prefix.clone()
            } else {
                prefix.to_string()
            },
            show_hidden: settings.show_hidden,
            confirm_exit: settings.confirm_exit,
            ..defaults
        }
    }

    /// Two refresh periods, so the open-files list has been redrawn before it is selected.
    pub fn focus_sync_delay(&self) -> Duration {
        self.refresh_interval * 2
    }
}
