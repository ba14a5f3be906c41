//! Persistent save storage.
//!
//! The unlock core only talks to the save through the [`SaveStore`] trait:
//! flags and counters addressed by namespaced string keys (see [`keys`]).
//! A missing key reads as `false` / `0`.

pub mod file;
pub mod keys;
pub mod memory;
pub mod plugin;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub use file::RonFileStore;
pub use memory::MemoryStore;
pub use plugin::*;

/// Errors raised by a save store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save store is unavailable")]
    Unavailable,

    #[error("save file IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file could not be parsed: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("save file could not be serialized: {0}")]
    Serialize(#[from] ron::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key/flag/counter storage maintained by the surrounding game.
pub trait SaveStore {
    fn get_flag(&self, key: &str) -> StoreResult<bool>;
    fn set_flag(&mut self, key: &str, value: bool) -> StoreResult<()>;
    fn get_counter(&self, key: &str) -> StoreResult<i64>;
    fn set_counter(&mut self, key: &str, value: i64) -> StoreResult<()>;

    /// Persist any pending writes. In-memory stores have nothing to do.
    fn flush(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

/// Serialized contents of a save file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    #[serde(default)]
    pub counters: BTreeMap<String, i64>,
}

impl SaveFile {
    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    pub fn counter(&self, key: &str) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }
}

/// Resource holding the active save store
#[derive(Resource, Deref, DerefMut)]
pub struct SaveData(pub Box<dyn SaveStore + Send + Sync>);

impl Default for SaveData {
    fn default() -> Self {
        Self(Box::new(MemoryStore::default()))
    }
}

impl SaveData {
    pub fn new(store: impl SaveStore + Send + Sync + 'static) -> Self {
        Self(Box::new(store))
    }

    pub fn store(&self) -> &dyn SaveStore {
        self.0.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn SaveStore {
        self.0.as_mut()
    }
}
