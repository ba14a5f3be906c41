use crate::store::{SaveFile, SaveStore, StoreError, StoreResult};

/// In-process save store.
///
/// Used when no save path is configured, and as the fail-safe fallback when a
/// save file cannot be read: an unavailable store rejects every read and write.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: SaveFile,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            data: SaveFile::default(),
            available: true,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_save(data: SaveFile) -> Self {
        Self {
            data,
            available: true,
        }
    }

    /// A store that fails every operation with [`StoreError::Unavailable`]
    pub fn unavailable() -> Self {
        Self {
            data: SaveFile::default(),
            available: false,
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn data(&self) -> &SaveFile {
        &self.data
    }

    fn check(&self) -> StoreResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }
}

impl SaveStore for MemoryStore {
    fn get_flag(&self, key: &str) -> StoreResult<bool> {
        self.check()?;
        Ok(self.data.flag(key))
    }

    fn set_flag(&mut self, key: &str, value: bool) -> StoreResult<()> {
        self.check()?;
        self.data.flags.insert(key.to_string(), value);
        Ok(())
    }

    fn get_counter(&self, key: &str) -> StoreResult<i64> {
        self.check()?;
        Ok(self.data.counter(key))
    }

    fn set_counter(&mut self, key: &str, value: i64) -> StoreResult<()> {
        self.check()?;
        self.data.counters.insert(key.to_string(), value);
        Ok(())
    }
}
