//! Hot reload of the configuration files.
//!
//! The watcher polls the base file and its overlays on an interval. When
//! their contents change it re-runs the whole resolution pipeline and swaps
//! the result into the [`SettingsStore`]. A broken edit is logged and the
//! previous settings stay active.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::loader::ConfigSource;
use crate::domain::models::{Environment, OverrideRule};
use crate::services::SettingsStore;

/// Configuration for the watcher loop.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Time between polls
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
        }
    }
}

impl WatcherConfig {
    /// Create config with a custom poll interval.
    pub fn with_interval(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

/// Result of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// First poll found the files matching the store; they became the baseline
    Primed,
    /// Files unchanged, or changed without affecting the resolved settings
    Unchanged,
    /// New settings were swapped in
    Reloaded,
    /// Files changed but did not resolve; the previous settings remain
    Rejected {
        /// Stable error kind
        kind: String,
        /// Full error message
        message: String,
    },
}

/// Contents of every source file, `None` where a file could not be read.
type Fingerprint = Vec<Option<Vec<u8>>>;

/// Polls a [`ConfigSource`] and keeps a [`SettingsStore`] up to date.
pub struct ConfigWatcher {
    source: ConfigSource,
    env: Environment,
    rules: Vec<OverrideRule>,
    store: Arc<SettingsStore>,
    config: WatcherConfig,
    last: Option<Fingerprint>,
}

impl ConfigWatcher {
    /// Create a watcher. The environment snapshot is fixed for its lifetime.
    pub fn new(
        source: ConfigSource,
        env: Environment,
        rules: &[OverrideRule],
        store: Arc<SettingsStore>,
        config: WatcherConfig,
    ) -> Self {
        Self {
            source,
            env,
            rules: rules.to_vec(),
            store,
            config,
            last: None,
        }
    }

    /// Store this watcher publishes into
    pub fn store(&self) -> &Arc<SettingsStore> {
        &self.store
    }

    /// Check the files once and reload if they changed.
    pub async fn poll_once(&mut self) -> ReloadOutcome {
        let fingerprint = self.fingerprint().await;

        // The store may predate the first poll, so the first baseline is
        // always resolved and compared against it.
        let first_poll = match &self.last {
            Some(last) if *last == fingerprint => return ReloadOutcome::Unchanged,
            Some(_) => false,
            None => true,
        };
        self.last = Some(fingerprint);

        if !first_poll {
            debug!(path = %self.source.path.display(), "configuration files changed");
        }
        match self.source.resolve(&self.env, &self.rules) {
            Ok(settings) if *self.store.current() == settings => {
                if first_poll {
                    ReloadOutcome::Primed
                } else {
                    ReloadOutcome::Unchanged
                }
            }
            Ok(settings) => {
                self.store.replace(settings);
                info!(path = %self.source.path.display(), "configuration reloaded");
                ReloadOutcome::Reloaded
            }
            Err(err) => {
                warn!(
                    path = %err.path().display(),
                    kind = err.kind(),
                    error = %err,
                    "configuration reload rejected, keeping previous settings"
                );
                ReloadOutcome::Rejected {
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                }
            }
        }
    }

    /// Poll until `shutdown` completes.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut timer = interval(self.config.poll_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            path = %self.source.path.display(),
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "watching configuration"
        );

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = timer.tick() => {
                    self.poll_once().await;
                }
            }
        }

        info!("configuration watcher stopped");
    }

    async fn fingerprint(&self) -> Fingerprint {
        let files: Vec<PathBuf> = self.source.files().map(PathBuf::from).collect();
        let mut contents = Vec::with_capacity(files.len());
        for file in files {
            contents.push(tokio::fs::read(&file).await.ok());
        }
        contents
    }
}
