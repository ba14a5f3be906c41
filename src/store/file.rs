use bevy::prelude::*;
use ron::ser::PrettyConfig;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{SaveFile, SaveStore, StoreResult};

/// Save store backed by a RON file on disk.
///
/// Writes stay in memory until [`SaveStore::flush`], which happens at level
/// exit and app exit rather than per field.
#[derive(Debug)]
pub struct RonFileStore {
    path: PathBuf,
    data: SaveFile,
    dirty: bool,
}

impl RonFileStore {
    /// Opens the save at `path`. A missing file starts an empty save.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            ron::from_str::<SaveFile>(&contents)?
        } else {
            info!("No save file at {}, starting a new save", path.display());
            SaveFile::default()
        };

        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &SaveFile {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl SaveStore for RonFileStore {
    fn get_flag(&self, key: &str) -> StoreResult<bool> {
        Ok(self.data.flag(key))
    }

    fn set_flag(&mut self, key: &str, value: bool) -> StoreResult<()> {
        if self.data.flags.insert(key.to_string(), value) != Some(value) {
            self.dirty = true;
        }
        Ok(())
    }

    fn get_counter(&self, key: &str) -> StoreResult<i64> {
        Ok(self.data.counter(key))
    }

    fn set_counter(&mut self, key: &str, value: i64) -> StoreResult<()> {
        if self.data.counters.insert(key.to_string(), value) != Some(value) {
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = ron::ser::to_string_pretty(&self.data, PrettyConfig::default())?;
        // Write to a sibling file first so a crash mid-write never truncates the save
        let tmp_path = self.path.with_extension("ron.tmp");
        fs::write(&tmp_path, serialized)?;
        fs::rename(&tmp_path, &self.path)?;

        self.dirty = false;
        info!("Saved progress to {}", self.path.display());
        Ok(())
    }
}
