use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::domain::models::ResolvedSettings;

/// Holder for the active settings.
///
/// Readers take a cheap `Arc` snapshot that never changes under them. A
/// reload swaps in a whole new snapshot; subscribers are woken on every swap.
#[derive(Debug)]
pub struct SettingsStore {
    tx: watch::Sender<Arc<ResolvedSettings>>,
}

impl SettingsStore {
    /// Create a store holding `initial`.
    pub fn new(initial: ResolvedSettings) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// Snapshot of the active settings.
    pub fn current(&self) -> Arc<ResolvedSettings> {
        self.tx.borrow().clone()
    }

    /// Make `next` the active settings and return the previous snapshot.
    pub fn replace(&self, next: ResolvedSettings) -> Arc<ResolvedSettings> {
        let source = next.source().display().to_string();
        let previous = self.tx.send_replace(Arc::new(next));
        info!(source = %source, "settings replaced");
        previous
    }

    /// Receiver that observes every future replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ResolvedSettings>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ConfigMap, RawDocument};
    use crate::services::validator::validate;

    fn settings(port: i64) -> ResolvedSettings {
        let mut doc = RawDocument::new("c.yaml", ConfigMap::new());
        doc.set("app.port", port.into());
        validate(doc).unwrap()
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = SettingsStore::new(settings(8050));
        let before = store.current();

        let previous = store.replace(settings(9000));

        assert_eq!(before.app().port, 8050);
        assert_eq!(previous.app().port, 8050);
        assert_eq!(store.current().app().port, 9000);
    }

    #[tokio::test]
    async fn test_subscriber_sees_replacement() {
        let store = SettingsStore::new(settings(8050));
        let mut rx = store.subscribe();

        store.replace(settings(9000));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().app().port, 9000);
    }
}
