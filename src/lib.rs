pub mod config;
pub mod download;
pub mod logging;
pub mod store;
pub mod util;

pub use config::{AdvancePolicy, Config};
pub use download::{run, Comic, ComicSource, Outcome, XkcdFeed};
