//! Interactive film search client: debounced autocomplete against `/suggest`,
//! form submission to `/search`, and rendering of the categorised results.

pub mod backend;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod dropdown;
pub mod error;
pub mod page;
pub mod payload;
pub mod query;
pub mod render;
pub mod session;
pub mod submit;
pub mod suggest;

#[cfg(test)]
mod testing;

pub use backend::{Backend, HttpBackend, RawReply};
pub use config::ClientConfig;
pub use controller::{Command, SearchController};
pub use dropdown::{Dropdown, Key};
pub use error::ClientError;
pub use query::SearchQuery;
pub use session::Session;
pub use suggest::Suggestion;
