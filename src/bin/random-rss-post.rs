//! Print one random post older than the exclusion window as a JSON object,
//! or `{}` when there is none.

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use rss_posts::config::Config;
use rss_posts::feed::load_items;
use rss_posts::select::{parse_exclusions, select_random};

#[derive(Parser, Debug)]
#[command(
    name = "random-rss-post",
    about = "Select a random blog post from an RSS feed"
)]
struct Args {
    /// Path to the RSS file
    rss_file: PathBuf,

    /// Exclude posts newer than this many days (default: 30)
    #[arg(allow_negative_numbers = true)]
    exclude_days: Option<i64>,

    /// JSON array of URLs to exclude from selection
    #[arg(long, default_value = "")]
    exclude_urls: String,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    rss_posts::logging::init();

    let config = Config::load_or_default(args.config.as_deref())?;
    let exclude_days = args.exclude_days.unwrap_or(config.random.exclude_days);
    let items = load_items(&args.rss_file, &config.marker);
    let excluded = parse_exclusions(&args.exclude_urls);

    let selected = select_random(
        &items,
        exclude_days,
        &excluded,
        Utc::now(),
        &mut rand::thread_rng(),
    );

    match selected {
        Some(item) => println!("{}", serde_json::to_string(&item.record())?),
        None => println!("{{}}"),
    }

    Ok(())
}
