//! Whole-state snapshot persistence.
//!
//! The wizard state is written as a single JSON document under a fixed key
//! after every change and read back once at startup. Backends only move
//! strings around; encoding and the fall-back-to-default policy live in
//! [`StatePersistence`].

use crate::{
    core::wizard::WizardState,
    entities::{StateSnapshot, state_snapshot},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, instrument, warn};

/// Storage key holding the serialized wizard state.
pub const STATE_KEY: &str = "bookingState";

/// Durable key-value storage for serialized snapshots.
pub trait SnapshotStore {
    /// Reads the value stored under `key`, or `None` if nothing was written.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Snapshots kept in the `state_snapshots` table, one row per key.
#[derive(Debug, Clone)]
pub struct DatabaseSnapshotStore {
    db: DatabaseConnection,
}

impl DatabaseSnapshotStore {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SnapshotStore for DatabaseSnapshotStore {
    #[instrument(skip(self))]
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let snapshot = StateSnapshot::find()
            .filter(state_snapshot::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(snapshot.map(|row| row.value))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        let existing = StateSnapshot::find()
            .filter(state_snapshot::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        if let Some(row) = existing {
            let mut active_model: state_snapshot::ActiveModel = row.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_row = state_snapshot::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_row.insert(&self.db).await?;
        }

        Ok(())
    }
}

/// Snapshots kept as `<key>.json` files inside a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }
}

/// In-process snapshots. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value under `key`, read synchronously.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores a raw value, bypassing encoding.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Encodes the wizard state to JSON and keeps it under [`STATE_KEY`].
#[derive(Debug, Clone)]
pub struct StatePersistence<B> {
    backend: B,
}

impl<B: SnapshotStore> StatePersistence<B> {
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads the saved state. A missing, unreadable or malformed snapshot
    /// yields the default state; the failure is only logged.
    pub async fn load(&self) -> WizardState {
        let raw = match self.backend.read(STATE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved booking state, starting fresh");
                return WizardState::default();
            }
            Err(e) => {
                warn!("Failed to read saved booking state, starting fresh: {e}");
                return WizardState::default();
            }
        };

        match serde_json::from_str::<WizardState>(&raw) {
            Ok(state) => {
                debug!(
                    step = %state.current_step,
                    bookings = state.bookings.len(),
                    "Restored booking state"
                );
                state
            }
            Err(e) => {
                warn!("Discarding unreadable booking state: {e}");
                WizardState::default()
            }
        }
    }

    /// Writes the whole state, replacing the previous snapshot.
    pub async fn save(&self, state: &WizardState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.backend.write(STATE_KEY, &json).await
    }
}
