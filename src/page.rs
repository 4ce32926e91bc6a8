use std::fmt::Write;

use serde_derive::Serialize;

use crate::dropdown::Dropdown;
use crate::error::Result;
use crate::render::{DetailsPanel, ResultSection};

const PAGE_HTML_TEMPLATE: &str = include_str!("templates/page.html");

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Asks the user to fix the input; no request was made.
    Prompt,
    Error,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn prompt(text: &str) -> Self {
        Message { kind: MessageKind::Prompt, text: text.to_owned() }
    }

    pub fn error(text: &str) -> Self {
        Message { kind: MessageKind::Error, text: text.to_owned() }
    }
}

/// Everything below the search field: loader, message, details panel and result sections.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub loading: bool,
    pub message: Option<Message>,
    pub details: Option<DetailsPanel>,
    pub sections: Vec<ResultSection>,
}

impl PageView {
    /// Show the loader and wipe whatever the previous search left behind.
    pub fn begin_search(&mut self) {
        *self = PageView { loading: true, ..PageView::default() };
    }
}

#[derive(Serialize, Debug)]
struct SuggestionItem {
    label: String,
    poster_url: Option<String>,
    highlighted: bool,
}

fn suggestion_items(dropdown: &Dropdown) -> Vec<SuggestionItem> {
    dropdown.suggestions().iter().enumerate().map(|(i, s)| SuggestionItem {
        label: s.input_value(),
        poster_url: s.poster_url.clone(),
        highlighted: dropdown.selected() == Some(i),
    }).collect()
}

pub struct PageRenderer {
    template: tera::Tera,
}

impl PageRenderer {
    pub fn new() -> Result<PageRenderer> {
        let mut template = tera::Tera::default();
        template.add_raw_template("page.html", PAGE_HTML_TEMPLATE)?;
        Ok(PageRenderer { template })
    }

    pub fn render_html(&self, input: &str, dropdown: &Dropdown, page: &PageView) -> Result<String> {
        let mut ctx = tera::Context::new();
        ctx.insert("input", input);
        ctx.insert("suggestions", &suggestion_items(dropdown));
        ctx.insert("page", page);
        Ok(self.template.render("page.html", &ctx)?)
    }
}

pub fn render_dropdown_text(dropdown: &Dropdown) -> String {
    let mut out = String::new();
    for (i, item) in suggestion_items(dropdown).iter().enumerate() {
        let marker = if item.highlighted { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {}. {}", i + 1, item.label);
    }
    out
}

pub fn render_text(page: &PageView) -> String {
    let mut out = String::new();
    if page.loading {
        out.push_str("Searching...\n");
    }
    if let Some(message) = &page.message {
        let _ = writeln!(out, "{}", message.text);
    }
    match &page.details {
        Some(DetailsPanel::Movie { title, released, runtime, genre, director, plot, ratings, .. }) => {
            out.push_str("Film Details\n");
            for (label, value) in [
                ("Title", title), ("Released", released), ("Runtime", runtime), ("Genre", genre),
                ("Director", director), ("Plot", plot), ("Ratings", ratings),
            ] {
                let _ = writeln!(out, "  {label}: {value}");
            }
        }
        Some(DetailsPanel::Missing { notice }) => {
            let _ = writeln!(out, "{notice}");
        }
        None => {}
    }
    for section in &page.sections {
        out.push('\n');
        match section {
            ResultSection::Table { icon, heading, rows, .. } => {
                let _ = writeln!(out, "{icon} {heading}");
                for row in rows {
                    let status = row.status.as_deref().map(|s| format!(" [{s}]")).unwrap_or_default();
                    let _ = writeln!(out, "  {}. {}{status} {}", row.index, row.name, row.url);
                }
            }
            ResultSection::Empty { notice, .. } => {
                let _ = writeln!(out, "{notice}");
            }
        }
    }
    out
}
