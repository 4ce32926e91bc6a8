//! Test doubles for the search backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Read;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use url::Url;

use crate::backend::{Backend, RawReply};
use crate::error::{ClientError, Result};
use crate::query::SearchQuery;
use crate::suggest::Suggestion;

/// In-process HTTP backend on an ephemeral port, stopped on drop.
pub struct MockServer {
    pub base_url: Url,
    stop: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl MockServer {
    pub fn start<F>(handler: F) -> MockServer
    where
        F: Fn(&rouille::Request) -> rouille::Response + Send + Sync + 'static,
    {
        let server = rouille::Server::new("127.0.0.1:0", handler).unwrap();
        let base_url = Url::parse(&format!("http://{}/", server.server_addr())).unwrap();
        let (handle, stop) = server.stoppable();
        MockServer { base_url, stop, handle: Some(handle) }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn request_body(request: &rouille::Request) -> String {
    let mut body = String::new();
    if let Some(mut data) = request.data() {
        data.read_to_string(&mut body).unwrap();
    }
    body
}

/// Scripted backend answering from memory and recording every call.
#[derive(Default)]
pub struct ScriptedBackend {
    pub suggestions: HashMap<String, Vec<Suggestion>>,
    pub search_reply: Option<RawReply>,
    pub suggest_calls: RefCell<Vec<String>>,
    pub search_calls: RefCell<Vec<SearchQuery>>,
}

impl ScriptedBackend {
    pub fn with_suggestions(mut self, query: &str, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions.insert(query.to_owned(), suggestions);
        self
    }

    pub fn with_search_reply(mut self, status: u16, body: &str) -> Self {
        self.search_reply = Some(RawReply { status, body: body.to_owned() });
        self
    }
}

impl Backend for ScriptedBackend {
    fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.suggest_calls.borrow_mut().push(query.to_owned());
        self.suggestions.get(query).cloned().ok_or(ClientError::Status(404))
    }

    fn search(&self, query: &SearchQuery) -> Result<RawReply> {
        self.search_calls.borrow_mut().push(query.clone());
        self.search_reply.clone().ok_or_else(|| ClientError::Malformed("no scripted reply".into()))
    }
}
