use std::time::Duration;

use url::Url;

use crate::error::Result;
use crate::suggest::DEFAULT_MIN_QUERY_LEN;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CATEGORIES: [&str; 6] = ["downloads", "tvshow_downloads", "streaming", "tvshows", "torrents", "subtitles"];

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend root; always ends with `/` so endpoint joins keep its path.
    pub base_url: Url,
    pub debounce: Duration,
    pub min_query_len: usize,
    pub timeout: Duration,
    pub user_agent: Option<String>,
    /// Categories always shown, in this order, even when the backend omits them.
    pub categories: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

pub fn parse_base_url(s: &str) -> Result<Url> {
    let mut url = Url::parse(s)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Global client options, shared by every subcommand.
pub fn args() -> Vec<clap::Arg> {
    vec![
        clap::Arg::new("base-url").long("base-url").global(true).default_value(DEFAULT_BASE_URL)
            .help("Root URL of the backend serving /suggest and /search"),
        clap::Arg::new("debounce-ms").long("debounce-ms").global(true)
            .value_parser(clap::value_parser!(u64)).default_value("300"),
        clap::Arg::new("min-query-len").long("min-query-len").global(true)
            .value_parser(clap::value_parser!(usize)).default_value("2"),
        clap::Arg::new("timeout-secs").long("timeout-secs").global(true)
            .value_parser(clap::value_parser!(u64)).default_value("10"),
        clap::Arg::new("user-agent").long("user-agent").global(true),
        clap::Arg::new("category").long("category").global(true).action(clap::ArgAction::Append)
            .help("Result category to always display (repeatable, replaces the defaults)"),
    ]
}

impl ClientConfig {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<ClientConfig> {
        let defaults = ClientConfig::default();
        let base_url = match matches.get_one::<String>("base-url") {
            Some(s) => parse_base_url(s)?,
            None => defaults.base_url,
        };
        let categories = match matches.get_many::<String>("category") {
            Some(values) => values.cloned().collect(),
            None => defaults.categories,
        };
        Ok(ClientConfig {
            base_url,
            debounce: matches.get_one::<u64>("debounce-ms").map(|ms| Duration::from_millis(*ms)).unwrap_or(defaults.debounce),
            min_query_len: matches.get_one::<usize>("min-query-len").copied().unwrap_or(defaults.min_query_len),
            timeout: matches.get_one::<u64>("timeout-secs").map(|s| Duration::from_secs(*s)).unwrap_or(defaults.timeout),
            user_agent: matches.get_one::<String>("user-agent").cloned(),
            categories,
        })
    }
}
