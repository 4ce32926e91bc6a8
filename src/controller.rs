//! The search box controller.
//!
//! Owns the field value, the debounced suggestion chain, the dropdown and the
//! page below the form. Handlers never perform I/O themselves: they return the
//! [`Command`]s to run, and the caller reports completions back with the
//! sequence number or ticket the command carried. Replies that are no longer
//! the latest are dropped without touching any state.

use std::time::{Duration, Instant};

use crate::backend::RawReply;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::dropdown::{Dropdown, Key, Reaction};
use crate::error::Result;
use crate::page::{Message, PageView};
use crate::query::SearchQuery;
use crate::submit::SearchSubmitter;
use crate::suggest::{FetchPlan, Suggestion, SuggestionFetcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchSuggestions { seq: u64, query: String },
    Search { ticket: u64, query: SearchQuery },
}

#[derive(Debug)]
pub struct SearchController {
    input: String,
    debouncer: Debouncer<String>,
    fetcher: SuggestionFetcher,
    dropdown: Dropdown,
    submitter: SearchSubmitter,
    page: PageView,
}

impl SearchController {
    pub fn new(config: &ClientConfig) -> Self {
        SearchController {
            input: String::new(),
            debouncer: Debouncer::new(config.debounce),
            fetcher: SuggestionFetcher::new(config.min_query_len),
            dropdown: Dropdown::default(),
            submitter: SearchSubmitter::new(config.categories.clone()),
            page: PageView::default(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    /// How long the event loop may sleep before the next `tick` has work to do.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_ready(now)
    }

    /// The user edited the field. Short text hides the dropdown right away and
    /// supersedes anything in flight; longer text is queued behind the debounce.
    pub fn input_changed(&mut self, now: Instant, text: &str) {
        self.input = text.to_owned();
        match self.fetcher.plan(text) {
            FetchPlan::Debounce(query) => self.debouncer.trigger(now, query),
            FetchPlan::Clear => {
                self.debouncer.cancel();
                self.dropdown.hide();
            }
        }
    }

    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        let Some(query) = self.debouncer.poll(now) else {
            return Vec::new();
        };
        let seq = self.fetcher.issue();
        log::debug!("Requesting suggestions #{seq} for {query:?}");
        vec![Command::FetchSuggestions { seq, query }]
    }

    /// A late reply that is still the latest re-opens the dropdown even after
    /// Escape or an outside click.
    pub fn suggestions_arrived(&mut self, seq: u64, reply: Result<Vec<Suggestion>>) {
        if let Some(suggestions) = self.fetcher.accept(seq, reply) {
            self.dropdown.render(suggestions);
        }
    }

    pub fn key(&mut self, key: Key) -> Vec<Command> {
        match self.dropdown.key(key) {
            Reaction::Commit(picked) => self.commit(picked),
            // the form's own submit on Enter
            Reaction::Ignored if key == Key::Enter => self.submit(),
            _ => Vec::new(),
        }
    }

    pub fn click_suggestion(&mut self, index: usize) -> Vec<Command> {
        match self.dropdown.click(index) {
            Reaction::Commit(picked) => self.commit(picked),
            _ => Vec::new(),
        }
    }

    /// Click or focus loss outside the field and the dropdown.
    pub fn dismiss(&mut self) {
        self.dropdown.hide();
    }

    fn commit(&mut self, picked: Suggestion) -> Vec<Command> {
        self.input = picked.input_value();
        self.submit()
    }

    pub fn submit(&mut self) -> Vec<Command> {
        self.dropdown.hide();
        self.debouncer.cancel();
        self.fetcher.invalidate();

        match self.submitter.submit(&self.input) {
            Err(err) => {
                self.page.message = Some(Message::prompt(&err.to_string()));
                Vec::new()
            }
            Ok(ticket) => {
                self.page.begin_search();
                vec![Command::Search { ticket: ticket.ticket, query: ticket.query }]
            }
        }
    }

    pub fn search_arrived(&mut self, ticket: u64, reply: Result<RawReply>) {
        if !self.submitter.is_latest(ticket) {
            log::debug!("Discarding reply to superseded search #{ticket}");
            return;
        }
        let outcome = self.submitter.interpret(reply);
        self.submitter.present(outcome, &mut self.page);
    }
}
