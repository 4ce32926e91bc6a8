use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// One autocomplete entry, in the order the backend ranked it.
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
pub struct Suggestion {
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
}

impl Suggestion {
    pub fn new(title: &str, year: &str) -> Self {
        Suggestion { title: title.to_owned(), year: year.to_owned(), poster_url: None }
    }

    /// Text written into the search field when the suggestion is picked.
    pub fn input_value(&self) -> String {
        if self.year.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.year)
        }
    }
}

// [{"title":"The Matrix","year":"1999","poster":"https://m.media-amazon.com/images/M/MV5B....jpg"}]
// Older deployments answer with bare titles: ["The Matrix", "The Matrix Reloaded"]
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum SuggestionWire {
    Title(String),
    Entry {
        title: String,
        #[serde(default)]
        year: Value,
        #[serde(default)]
        poster: Option<String>,
    },
}

impl From<SuggestionWire> for Suggestion {
    fn from(wire: SuggestionWire) -> Self {
        match wire {
            SuggestionWire::Title(title) => Suggestion { title, year: String::new(), poster_url: None },
            SuggestionWire::Entry { title, year, poster } => Suggestion {
                title,
                year: match year {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    _ => String::new(),
                },
                poster_url: poster.filter(|p| !p.is_empty() && p != "N/A"),
            },
        }
    }
}

pub fn parse_suggestions(body: &str) -> Result<Vec<Suggestion>> {
    let wire: Vec<SuggestionWire> = serde_json::from_str(body)?;
    Ok(wire.into_iter().map(Suggestion::from).collect())
}

/// What to do with freshly edited field text.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchPlan {
    /// Too short to query: hide the dropdown locally.
    Clear,
    /// Queue the trimmed query behind the debounce.
    Debounce(String),
}

/// Numbers outgoing suggestion requests and drops replies that are not the latest.
#[derive(Debug)]
pub struct SuggestionFetcher {
    min_len: usize,
    issued: u64,
}

impl SuggestionFetcher {
    pub fn new(min_len: usize) -> Self {
        SuggestionFetcher { min_len, issued: 0 }
    }

    /// Short text also makes every in-flight request stale.
    pub fn plan(&mut self, text: &str) -> FetchPlan {
        let query = text.trim();
        if query.is_empty() || query.chars().count() < self.min_len {
            self.invalidate();
            return FetchPlan::Clear;
        }
        FetchPlan::Debounce(query.to_owned())
    }

    /// Number a request that is about to go out.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Make every request issued so far stale.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }

    /// Filter a completed request: only the latest successful reply gets through.
    pub fn accept(&self, seq: u64, reply: Result<Vec<Suggestion>>) -> Option<Vec<Suggestion>> {
        if !self.is_latest(seq) {
            log::debug!("Discarding stale suggestions (request #{seq}, latest #{})", self.issued);
            return None;
        }
        match reply {
            Ok(suggestions) => Some(suggestions),
            Err(err) => {
                log::warn!("Suggestion request #{seq} failed: {err}");
                None
            }
        }
    }
}
