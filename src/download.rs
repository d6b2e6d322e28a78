use eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::config::{AdvancePolicy, Config};
use crate::store::{Archived, LastComic, Store};
use crate::util::Layout;

pub const IMAGE_EXTENSION: &str = ".png";

/// Comic as described by the JSON feed. Other fields are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comic {
    #[serde(default)]
    pub num: usize,
    pub title: String,
    pub img: String,
}
impl Comic {
    /// Name the image is stored under in the storage directory.
    pub fn file_name(&self) -> String {
        safe_file_name(&self.title)
    }
}

/// Lower-cases `title`, turns spaces and path separators into underscores
/// and appends the image extension.
pub fn safe_file_name(title: &str) -> String {
    let mut name: String = title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect::<String>()
        .to_lowercase();
    name.push_str(IMAGE_EXTENSION);
    name
}

/// Where comics come from.
pub trait ComicSource {
    fn fetch_latest(&self) -> Result<Comic>;
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

/// The live feed over HTTP.
#[derive(Debug, Clone)]
pub struct XkcdFeed {
    feed_url: String,
}
impl XkcdFeed {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
        }
    }
}
impl ComicSource for XkcdFeed {
    fn fetch_latest(&self) -> Result<Comic> {
        let comic = ureq::get(&self.feed_url)
            .call()
            .wrap_err_with(|| format!("error fetching {}", self.feed_url))?
            .into_json()
            .wrap_err_with(|| format!("error parsing comic from {}", self.feed_url))?;
        Ok(comic)
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let mut buffer = vec![];
        ureq::get(url)
            .call()
            .wrap_err_with(|| format!("error downloading {url}"))?
            .into_reader()
            .read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// What a sync did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The state file already names the latest comic.
    Unchanged { file_name: String },
    /// A new comic was recorded in the state file.
    Updated {
        file_name: String,
        archived: Option<String>,
        downloaded: bool,
    },
    /// Dry run; nothing on disk was touched.
    Planned {
        file_name: String,
        archive: Option<String>,
    },
}

/// Checks the feed and, if the comic changed, downloads the new image,
/// archives the old one and records the new one.
pub fn sync_latest(
    store: &Store,
    source: &impl ComicSource,
    advance: AdvancePolicy,
    dry_run: bool,
) -> Result<Outcome> {
    log::debug!("fetching latest comic ...");
    let comic = source.fetch_latest()?;
    let file_name = comic.file_name();
    log::debug!("latest comic is #{} {:?} ({})", comic.num, comic.title, comic.img);

    let previous = if dry_run && !store.has_state() {
        LastComic::None
    } else {
        store.load_last()?
    };

    if previous.file_name() == Some(file_name.as_str()) {
        log::info!("Already got the comic!");
        return Ok(Outcome::Unchanged { file_name });
    }

    if dry_run {
        if let Some(old) = previous.file_name() {
            log::info!("would move {old} to {}", store.layout().archive_dir().display());
        }
        log::info!("would download {} as {file_name}", comic.img);
        return Ok(Outcome::Planned {
            archive: previous.file_name().map(str::to_owned),
            file_name,
        });
    }

    // The new image is written first so a failed download leaves the old
    // one in place.
    log::info!("downloading {} as {file_name}", comic.img);
    let downloaded = match source
        .fetch_image(&comic.img)
        .and_then(|bytes| store.write_comic(&file_name, &bytes))
    {
        Ok(()) => true,
        Err(e) => {
            tolerate(advance, e)?;
            false
        }
    };

    let mut archived = None;
    if let Some(old) = previous.file_name() {
        log::info!("moving {old} to {}", store.layout().archive_dir().display());
        match store.archive(old) {
            Ok(Archived::Moved) => archived = Some(old.to_owned()),
            Ok(Archived::Missing) => log::warn!("{old} is not in the storage directory"),
            Err(e) => tolerate(advance, e)?,
        }
    }

    store.save_last(&file_name)?;
    Ok(Outcome::Updated {
        file_name,
        archived,
        downloaded,
    })
}

/// Under `OnSuccess` the error ends the run before the state file is
/// advanced; under `Always` it is only logged.
fn tolerate(advance: AdvancePolicy, e: eyre::Report) -> Result<()> {
    match advance {
        AdvancePolicy::OnSuccess => Err(e),
        AdvancePolicy::Always => {
            log::warn!("{e:#}");
            Ok(())
        }
    }
}

/// Sets up the storage directory (unless dry running) and syncs it with
/// `source`.
pub fn run(config: &Config, source: &impl ComicSource) -> Result<Outcome> {
    let store = Store::new(Layout::new(&config.storage_dir));
    if !config.dry_run {
        store.ensure_exists()?;
    }
    sync_latest(&store, source, config.advance, config.dry_run)
}
