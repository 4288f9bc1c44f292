//! Polling hot-reload of `config.ron`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use skyhud_config::Config;
use tracing::warn;

/// How often the window re-reads the config file.
pub const RELOAD_INTERVAL: Duration = Duration::from_secs(1);

/// Re-reads the config file at a fixed interval and hands back a new
/// [`Config`] whenever its contents change.
pub struct ConfigWatcher {
    dir: PathBuf,
    current: Config,
    interval: Duration,
    next_check: Instant,
}

impl ConfigWatcher {
    /// Watch `dir/config.ron`, starting from `current` as it was read from
    /// disk (before CLI overrides). The first check happens one interval
    /// after `now`.
    pub fn new(dir: PathBuf, current: Config, interval: Duration, now: Instant) -> Self {
        Self {
            dir,
            current,
            interval,
            next_check: now + interval,
        }
    }

    /// When the next check is due.
    pub fn next_check(&self) -> Instant {
        self.next_check
    }

    /// Check the file if an interval has passed since the last check.
    /// Read or parse failures are logged and keep the current config.
    pub fn poll(&mut self, now: Instant) -> Option<Config> {
        if now < self.next_check {
            return None;
        }
        self.next_check = now + self.interval;
        match self.current.reload(&self.dir) {
            Ok(Some(config)) => {
                self.current = config.clone();
                Some(config)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Config reload failed, keeping current settings: {e}");
                None
            }
        }
    }
}
