use thiserror::Error;

use crate::backend::RawReply;
use crate::error::Result;
use crate::page::{Message, PageView};
use crate::payload::{parse_search_body, MovieDetails, ResultSet, SearchBody};
use crate::query::SearchQuery;
use crate::render::{render_details, render_results};

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a moment before searching again.";
pub const FAILURE_MESSAGE: &str = "An error occurred while fetching results.";

const HTTP_TOO_MANY_REQUESTS: u16 = 429;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please enter a movie title.")]
    EmptyInput,
}

/// A submission that passed validation, tagged with its generation.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub ticket: u64,
    pub query: SearchQuery,
}

/// How a finished search ends up on the page.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    RateLimited,
    ApplicationError(String),
    TransportFailure,
    Results {
        movie_details: Option<MovieDetails>,
        results: ResultSet,
    },
}

#[derive(Debug)]
pub struct SearchSubmitter {
    categories: Vec<String>,
    issued: u64,
}

impl SearchSubmitter {
    pub fn new(categories: Vec<String>) -> Self {
        SearchSubmitter { categories, issued: 0 }
    }

    pub fn submit(&mut self, input: &str) -> std::result::Result<SearchTicket, SubmitError> {
        if input.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        self.issued += 1;
        Ok(SearchTicket { ticket: self.issued, query: SearchQuery::parse(input) })
    }

    /// Replies to anything but the most recent submission are ignored.
    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.issued
    }

    pub fn interpret(&self, reply: Result<RawReply>) -> SearchOutcome {
        let reply = match reply {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Search request failed: {err}");
                return SearchOutcome::TransportFailure;
            }
        };
        if reply.status == HTTP_TOO_MANY_REQUESTS {
            log::warn!("Search rejected by backend rate limiting");
            return SearchOutcome::RateLimited;
        }
        match parse_search_body(&reply.body) {
            Ok(SearchBody::Error(message)) => SearchOutcome::ApplicationError(message),
            Ok(SearchBody::Results { .. }) if !(200..300).contains(&reply.status) => {
                log::warn!("Search answered HTTP {} without an error message", reply.status);
                SearchOutcome::TransportFailure
            }
            Ok(SearchBody::Results { movie_details, results }) => SearchOutcome::Results { movie_details, results },
            Err(err) => {
                log::warn!("Undecodable search reply (HTTP {}): {err}", reply.status);
                SearchOutcome::TransportFailure
            }
        }
    }

    /// Ends the loading phase and fills the page. Failures leave details and sections empty.
    pub fn present(&self, outcome: SearchOutcome, page: &mut PageView) {
        page.loading = false;
        match outcome {
            SearchOutcome::RateLimited => page.message = Some(Message::error(RATE_LIMIT_MESSAGE)),
            SearchOutcome::ApplicationError(text) => page.message = Some(Message::error(&text)),
            SearchOutcome::TransportFailure => page.message = Some(Message::error(FAILURE_MESSAGE)),
            SearchOutcome::Results { movie_details, results } => {
                page.message = None;
                page.details = Some(render_details(movie_details.as_ref()));
                page.sections = render_results(&results, &self.categories);
                log::info!(target: "cli", "Rendered {} result sections", page.sections.len());
            }
        }
    }
}
