use std::path::{Path, PathBuf};

use eyre::{eyre, Result};

pub const STORAGE_DIR_NAME: &str = ".xkcd_download";
pub const ARCHIVE_DIR_NAME: &str = "old_comics";
pub const STATE_FILE_NAME: &str = "previous_comic.txt";

/// Returns `~/.xkcd_download` for the current user.
pub fn default_storage_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(STORAGE_DIR_NAME))
        .ok_or_else(|| eyre!("unable to determine home directory"))
}

/// Locations of everything inside a storage directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}
impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.root.join(ARCHIVE_DIR_NAME)
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE_NAME)
    }

    pub fn comic_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn archived_comic_path(&self, file_name: &str) -> PathBuf {
        self.archive_dir().join(file_name)
    }
}
