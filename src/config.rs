use std::path::PathBuf;

use clap::ValueEnum;

pub const DEFAULT_FEED_URL: &str = "https://xkcd.com/info.0.json";

/// When to record a new comic in the state file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AdvancePolicy {
    /// Only after the old comic is archived and the new one is downloaded.
    #[default]
    OnSuccess,
    /// Even if archiving or downloading failed.
    Always,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub feed_url: String,
    pub advance: AdvancePolicy,
    pub dry_run: bool,
}
impl Config {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            feed_url: DEFAULT_FEED_URL.to_owned(),
            advance: AdvancePolicy::default(),
            dry_run: false,
        }
    }
}
