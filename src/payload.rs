use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

const MOVIE_DETAILS_KEY: &str = "movie_details";
const ERROR_KEY: &str = "error";

/// One row of a result category.
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
pub struct ResultLink {
    pub name: String,
    pub url: String,
    /// Link check verdict ("Found", "Unsure") from deployments that still report it.
    pub status: Option<String>,
}

impl ResultLink {
    pub fn new(name: &str, url: &str) -> Self {
        ResultLink { name: name.to_owned(), url: url.to_owned(), status: None }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
pub struct Category {
    pub label: String,
    pub entries: Vec<ResultLink>,
}

/// Result categories in the order the backend sent them.
#[derive(Serialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct ResultSet {
    categories: Vec<Category>,
}

impl ResultSet {
    pub fn new() -> Self {
        ResultSet { categories: Vec::new() }
    }

    /// Add a category, replacing the entries of an existing one with the same label.
    pub fn insert(&mut self, label: &str, entries: Vec<ResultLink>) {
        match self.categories.iter_mut().find(|c| c.label == label) {
            Some(existing) => existing.entries = entries,
            None => self.categories.push(Category { label: label.to_owned(), entries }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[ResultLink]> {
        self.categories.iter().find(|c| c.label == label).map(|c| c.entries.as_slice())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

// "Ratings":[{"Source":"Internet Movie Database","Value":"7.1/10"},{"Source":"Rotten Tomatoes","Value":"82%"}]
#[derive(Deserialize, Debug)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct OmdbRatings {
    pub source: String,
    pub value: String,
}

/// OMDB-style metadata attached to a search reply. Missing fields stay `None`.
#[derive(Serialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct MovieDetails {
    pub title: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub ratings: Option<String>,
    pub poster: Option<String>,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn ratings_text(value: &Value) -> Option<String> {
    if value.is_array() {
        let ratings = serde_json::from_value::<Vec<OmdbRatings>>(value.clone()).ok()?;
        let joined = ratings.iter()
            .map(|r| format!("{}: {}", r.source, r.value))
            .collect::<Vec<_>>()
            .join(", ");
        return (!joined.is_empty()).then_some(joined);
    }
    scalar_text(value)
}

impl MovieDetails {
    /// `None` for a missing, null or empty `movie_details` object.
    pub fn from_value(value: &Value) -> Option<MovieDetails> {
        let fields = value.as_object().filter(|o| !o.is_empty())?;
        let text = |key: &str| fields.get(key).and_then(scalar_text);
        Some(MovieDetails {
            title: text("Title"),
            released: text("Released"),
            runtime: text("Runtime"),
            genre: text("Genre"),
            director: text("Director"),
            plot: text("Plot"),
            ratings: fields.get("Ratings").and_then(ratings_text),
            poster: text("Poster").filter(|p| p != "N/A"),
        })
    }
}

/// A decoded `/search` body.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SearchBody {
    Error(String),
    Results {
        movie_details: Option<MovieDetails>,
        results: ResultSet,
    },
}

fn parse_entries(label: &str, value: &Value) -> Option<Vec<ResultLink>> {
    match value {
        Value::Null => Some(Vec::new()),
        // [{"name": "SiteA", "url": "http://a"}, ...]
        Value::Array(items) => Some(items.iter().filter_map(|item| match item {
            Value::String(url) => Some(ResultLink::new(url, url)),
            Value::Object(fields) => {
                let url = fields.get("url").and_then(Value::as_str)?;
                let name = fields.get("name").and_then(Value::as_str).unwrap_or(url);
                Some(ResultLink {
                    name: name.to_owned(),
                    url: url.to_owned(),
                    status: fields.get("status").and_then(Value::as_str).map(String::from),
                })
            }
            _ => {
                log::debug!("Skipping malformed entry in {label}: {item}");
                None
            }
        }).collect()),
        // {"https://site/search?q=Inception": "Found", ...}
        Value::Object(links) => Some(links.iter().map(|(url, status)| ResultLink {
            name: url.clone(),
            url: url.clone(),
            status: status.as_str().map(String::from),
        }).collect()),
        _ => None,
    }
}

fn error_message(fields: &Map<String, Value>) -> Option<String> {
    match fields.get(ERROR_KEY)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn parse_search_body(body: &str) -> Result<SearchBody> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(fields) = value else {
        return Err(ClientError::Malformed("search reply is not a JSON object".into()));
    };
    if let Some(message) = error_message(&fields) {
        return Ok(SearchBody::Error(message));
    }

    let movie_details = fields.get(MOVIE_DETAILS_KEY).and_then(MovieDetails::from_value);
    let mut results = ResultSet::new();
    for (label, value) in fields.iter().filter(|(k, _)| *k != MOVIE_DETAILS_KEY && *k != ERROR_KEY) {
        match parse_entries(label, value) {
            Some(entries) => results.insert(label, entries),
            None => log::debug!("Ignoring non-category field {label}"),
        }
    }
    Ok(SearchBody::Results { movie_details, results })
}
