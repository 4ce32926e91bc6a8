//! Maps search payloads onto structured page sections.
//!
//! Nothing here touches the network or the clock; the output is plain data
//! that the page templates (or the terminal printer) lay out.

use serde_derive::Serialize;

use crate::payload::{MovieDetails, ResultLink, ResultSet};

const NOT_AVAILABLE: &str = "N/A";
const NO_DETAILS_NOTICE: &str = "No movie details found.";

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
pub struct ResultRow {
    /// 1-based position shown in the first column.
    pub index: usize,
    pub name: String,
    pub url: String,
    pub status: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultSection {
    Table {
        category: String,
        icon: &'static str,
        heading: String,
        rows: Vec<ResultRow>,
    },
    Empty {
        category: String,
        notice: String,
    },
}

impl ResultSection {
    pub fn category(&self) -> &str {
        match self {
            ResultSection::Table { category, .. } | ResultSection::Empty { category, .. } => category,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailsPanel {
    Movie {
        title: String,
        released: String,
        runtime: String,
        genre: String,
        director: String,
        plot: String,
        ratings: String,
        poster: Option<String>,
    },
    Missing {
        notice: String,
    },
}

pub fn category_icon(label: &str) -> &'static str {
    let label = label.to_lowercase();
    if label.contains("download") {
        "⬇️"
    } else if label.contains("streaming") {
        "📺"
    } else if label.contains("torrent") {
        "🧲"
    } else if label.contains("subtitle") {
        "📝"
    } else {
        "🎬"
    }
}

/// "tvshow_downloads" -> "Tvshow Downloads"
pub fn category_heading(label: &str) -> String {
    label.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_category(label: &str, entries: &[ResultLink]) -> ResultSection {
    if entries.is_empty() {
        return ResultSection::Empty {
            category: label.to_owned(),
            notice: format!("No results found for {}.", category_heading(label).to_lowercase()),
        };
    }
    ResultSection::Table {
        category: label.to_owned(),
        icon: category_icon(label),
        heading: category_heading(label),
        rows: entries.iter().enumerate().map(|(i, link)| ResultRow {
            index: i + 1,
            name: link.name.clone(),
            url: link.url.clone(),
            status: link.status.clone(),
        }).collect(),
    }
}

/// Expected categories come first in configured order, absent ones as notices;
/// any other category follows in payload order.
pub fn render_results(results: &ResultSet, expected: &[String]) -> Vec<ResultSection> {
    let expected_sections = expected.iter()
        .map(|label| render_category(label, results.get(label).unwrap_or_default()));
    let extra_sections = results.categories().iter()
        .filter(|c| !expected.contains(&c.label))
        .map(|c| render_category(&c.label, &c.entries));
    expected_sections.chain(extra_sections).collect()
}

pub fn render_details(details: Option<&MovieDetails>) -> DetailsPanel {
    let Some(details) = details else {
        return DetailsPanel::Missing { notice: NO_DETAILS_NOTICE.to_owned() };
    };
    let or_na = |field: &Option<String>| field.clone().unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    DetailsPanel::Movie {
        title: or_na(&details.title),
        released: or_na(&details.released),
        runtime: or_na(&details.runtime),
        genre: or_na(&details.genre),
        director: or_na(&details.director),
        plot: or_na(&details.plot),
        ratings: or_na(&details.ratings),
        poster: details.poster.clone(),
    }
}
