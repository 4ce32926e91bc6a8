use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::Serialize;

lazy_static! {
    // "The Matrix (1999)", "Breaking Bad (2008–2013)", "Dune (2021) "
    static ref TRAILING_YEAR_RE: Regex =
        Regex::new(r"^(?P<title>.*?)\s*\((?P<year>[0-9]{4})[^()]*\)\s*$").unwrap();
}

/// Title and optional year sent to the search endpoint.
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
pub struct SearchQuery {
    pub title: String,
    /// Four digits, or empty when the input carried no year.
    pub year: String,
}

impl SearchQuery {
    pub fn parse(input: &str) -> SearchQuery {
        let text = input.trim();
        let parsed = TRAILING_YEAR_RE.captures(text).and_then(|caps| {
            let title = caps.name("title")?.as_str().trim();
            let year = caps.name("year")?.as_str();
            (!title.is_empty()).then(|| SearchQuery { title: title.to_owned(), year: year.to_owned() })
        });
        parsed.unwrap_or_else(|| SearchQuery { title: text.to_owned(), year: String::new() })
    }

    /// `application/x-www-form-urlencoded` body for `POST /search`.
    pub fn form_body(&self) -> String {
        format!(
            "movie_title={}&movie_year={}",
            urlencoding::encode(&self.title),
            urlencoding::encode(&self.year)
        )
    }
}
