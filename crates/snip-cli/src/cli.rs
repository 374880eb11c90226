use clap::Parser;
use std::path::PathBuf;
use url::Url;

pub const CACHE_DIR_ENV: &str = "SNIP_CACHE_DIR";
pub const CACHE_FILE_ENV: &str = "SNIP_CACHE_FILE";
pub const BASE_URL_ENV: &str = "SNIP_BASE_URL";

pub const DEFAULT_CACHE_DIR: &str = ".";
pub const DEFAULT_CACHE_FILE: &str = "ShortenedCache.json";
pub const DEFAULT_BASE_URL: &str = "http://tinyurl.com";
pub const DEFAULT_TOP: &str = "3";

#[derive(Debug, Parser)]
#[command(
    name = "snip",
    version,
    about = "Shortens URLs using tinyurl.com and caches the results",
    long_about = "Shortens URLs using tinyurl.com. Every URL is served from the local \
                  cache when possible, otherwise it is shortened and cached, and its hit \
                  counter goes up.\n\nRunning without options starts the interactive \
                  mode (type q + <Enter> to quit)."
)]
pub struct CLI {
    /// Get the cached short url, or generate and cache one
    #[arg(short = 'u', long = "url", value_name = "URL", conflicts_with = "top")]
    pub url: Option<String>,

    /// Print the most used urls in the cache
    #[arg(
        short = 't',
        long = "top",
        value_name = "LIMIT",
        num_args = 0..=1,
        default_missing_value = DEFAULT_TOP,
        allow_negative_numbers = true
    )]
    pub top: Option<i64>,

    /// Directory holding the cache file
    #[arg(long, env = CACHE_DIR_ENV, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Name of the cache file
    #[arg(long, env = CACHE_FILE_ENV, default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: String,

    /// Root of the shortening service
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,
}

/// What the tool was asked to do.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Shorten(String),
    Top(i64),
    Interactive,
}

impl CLI {
    pub fn mode(&self) -> Mode {
        match (&self.url, self.top) {
            (Some(url), _) => Mode::Shorten(url.clone()),
            (None, Some(limit)) => Mode::Top(limit),
            (None, None) => Mode::Interactive,
        }
    }
}
