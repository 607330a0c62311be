//! Print the unannounced posts of a given day as a JSON array.

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use rss_posts::config::Config;
use rss_posts::feed::load_items;
use rss_posts::item::ItemRecord;
use rss_posts::select::{parse_target_date, select_by_date};

#[derive(Parser, Debug)]
#[command(
    name = "detect-rss-posts",
    about = "Detect blog posts from an RSS feed that match a target date"
)]
struct Args {
    /// Publication day to look for (YYYY-MM-DD, UTC)
    target_date: String,

    /// Path to the RSS file
    rss_file: PathBuf,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    rss_posts::logging::init();

    let config = Config::load_or_default(args.config.as_deref())?;
    let items = load_items(&args.rss_file, &config.marker);

    let matches = match parse_target_date(&args.target_date) {
        Some(target) => select_by_date(&items, target),
        None => {
            warn!("Target date {:?} is not YYYY-MM-DD, nothing can match", args.target_date);
            Vec::new()
        }
    };

    let records: Vec<ItemRecord<'_>> = matches.iter().map(|item| item.record()).collect();
    println!("{}", serde_json::to_string(&records)?);

    Ok(())
}
