use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use xkcd_latest::config::DEFAULT_FEED_URL;
use xkcd_latest::logging::{init_logger, LogLevel};
use xkcd_latest::{AdvancePolicy, Config, XkcdFeed};

/// Downloads the latest xkcd and archives the previous one
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to keep comics in. Defaults to ~/.xkcd_download.
    #[arg(short, long, env = "XKCD_DOWNLOAD_DIR")]
    dir: Option<PathBuf>,

    /// URL of the JSON feed describing the current comic.
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// When to record a new comic as the latest one.
    #[arg(long, value_enum, default_value_t = AdvancePolicy::OnSuccess)]
    advance: AdvancePolicy,

    /// Report what would happen without touching the disk.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Increase verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(LogLevel::from_flags(args.verbose, args.quiet))?;

    let storage_dir = match args.dir {
        Some(dir) => dir,
        None => xkcd_latest::util::default_storage_dir()?,
    };
    let config = Config {
        storage_dir,
        feed_url: args.feed_url,
        advance: args.advance,
        dry_run: args.dry_run,
    };

    xkcd_latest::run(&config, &XkcdFeed::new(&config.feed_url))?;
    Ok(())
}
