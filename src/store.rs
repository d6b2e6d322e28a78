use std::io::ErrorKind;

use eyre::{Result, WrapErr};

use crate::util::Layout;

/// State file contents meaning "nothing downloaded yet".
pub const SENTINEL: &str = "NULL";

/// Last comic recorded in the state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastComic {
    None,
    File(String),
}
impl LastComic {
    /// Interprets the raw state file contents. An empty file counts as the
    /// sentinel so that it can never name the storage directory itself.
    pub fn parse(contents: &str) -> Self {
        if contents.is_empty() || contents == SENTINEL {
            LastComic::None
        } else {
            LastComic::File(contents.to_owned())
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            LastComic::None => None,
            LastComic::File(name) => Some(name),
        }
    }
}

/// Result of moving a comic into the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archived {
    Moved,
    /// There was no file with that name to move.
    Missing,
}

/// On-disk store of the current comic, the archive and the state file.
#[derive(Debug, Clone)]
pub struct Store {
    layout: Layout,
}
impl Store {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Creates the storage directory, the archive directory and the state
    /// file if any of them are missing.
    pub fn ensure_exists(&self) -> Result<()> {
        for dir in [self.layout.root().to_path_buf(), self.layout.archive_dir()] {
            if !dir.is_dir() {
                std::fs::create_dir_all(&dir)
                    .wrap_err_with(|| format!("error creating directory {}", dir.display()))?;
                log::info!("creating directory {}", dir.display());
            }
        }

        let state_path = self.layout.state_path();
        if !state_path.exists() {
            std::fs::write(&state_path, SENTINEL)
                .wrap_err_with(|| format!("error creating {}", state_path.display()))?;
            log::info!("no previous comic detected, creating file...");
        }

        Ok(())
    }

    pub fn has_state(&self) -> bool {
        self.layout.state_path().is_file()
    }

    pub fn load_last(&self) -> Result<LastComic> {
        let path = self.layout.state_path();
        let contents =
            std::fs::read(&path).wrap_err_with(|| format!("error reading {}", path.display()))?;
        Ok(LastComic::parse(&String::from_utf8_lossy(&contents)))
    }

    /// Overwrites the state file with `file_name`, byte for byte.
    pub fn save_last(&self, file_name: &str) -> Result<()> {
        let path = self.layout.state_path();
        std::fs::write(&path, file_name)
            .wrap_err_with(|| format!("error writing {}", path.display()))
    }

    pub fn archive(&self, file_name: &str) -> Result<Archived> {
        let from = self.layout.comic_path(file_name);
        let to = self.layout.archived_comic_path(file_name);
        match std::fs::rename(&from, &to) {
            Ok(()) => Ok(Archived::Moved),
            Err(e) if e.kind() == ErrorKind::NotFound && !from.exists() => Ok(Archived::Missing),
            Err(e) => Err(e).wrap_err_with(|| {
                format!("error moving {} to {}", from.display(), to.display())
            }),
        }
    }

    pub fn write_comic(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.layout.comic_path(file_name);
        std::fs::write(&path, bytes).wrap_err_with(|| format!("error writing {}", path.display()))
    }
}
