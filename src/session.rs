use std::time::Instant;

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::controller::{Command, SearchController};
use crate::dropdown::Key;

/// Runs a controller against a backend, resolving each command as soon as it is issued.
pub struct Session<B: Backend> {
    backend: B,
    controller: SearchController,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B, config: &ClientConfig) -> Self {
        Session { backend, controller: SearchController::new(config) }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn type_text(&mut self, now: Instant, text: &str) {
        self.controller.input_changed(now, text);
    }

    /// Let the clock move to `now`, firing a due suggestion request.
    pub fn advance(&mut self, now: Instant) {
        let commands = self.controller.tick(now);
        self.run(commands);
    }

    pub fn key(&mut self, key: Key) {
        let commands = self.controller.key(key);
        self.run(commands);
    }

    pub fn click(&mut self, index: usize) {
        let commands = self.controller.click_suggestion(index);
        self.run(commands);
    }

    pub fn dismiss(&mut self) {
        self.controller.dismiss();
    }

    pub fn submit(&mut self) {
        let commands = self.controller.submit();
        self.run(commands);
    }

    fn run(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::FetchSuggestions { seq, query } => {
                    let reply = self.backend.suggest(&query);
                    self.controller.suggestions_arrived(seq, reply);
                }
                Command::Search { ticket, query } => {
                    let reply = self.backend.search(&query);
                    self.controller.search_arrived(ticket, reply);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rouille::Response;

    use super::*;
    use crate::backend::HttpBackend;
    use crate::page::render_text;
    use crate::query::SearchQuery;
    use crate::render::{DetailsPanel, ResultSection};
    use crate::suggest::Suggestion;
    use crate::testing::{request_body, MockServer, ScriptedBackend};

    #[test]
    fn test_typing_then_picking_a_suggestion() {
        let config = ClientConfig::default();
        let backend = ScriptedBackend::default()
            .with_suggestions("matr", vec![Suggestion::new("The Matrix", "1999"), Suggestion::new("The Matrix Reloaded", "2003")])
            .with_search_reply(200, r#"{"movie_details": {"Title": "The Matrix"}, "downloads": [{"name": "SiteA", "url": "http://a"}]}"#);
        let mut session = Session::new(backend, &config);

        let t0 = Instant::now();
        for (i, text) in ["m", "ma", "mat", "matr"].iter().enumerate() {
            let now = t0 + Duration::from_millis(50 * i as u64);
            session.type_text(now, text);
            session.advance(now);
        }
        session.advance(t0 + Duration::from_secs(1));
        assert_eq!(*session.backend().suggest_calls.borrow(), vec!["matr".to_string()]);
        assert_eq!(session.controller().dropdown().suggestions().len(), 2);

        session.key(Key::ArrowDown);
        session.key(Key::ArrowDown);
        session.key(Key::ArrowUp);
        session.key(Key::Enter);

        assert_eq!(
            *session.backend().search_calls.borrow(),
            vec![SearchQuery { title: "The Matrix".into(), year: "1999".into() }]
        );
        let page = session.controller().page();
        assert!(matches!(&page.details, Some(DetailsPanel::Movie { title, .. }) if title == "The Matrix"));
        assert_eq!(page.sections.len(), config.categories.len());
    }

    #[test]
    fn test_failed_suggestions_are_silent() {
        let mut session = Session::new(ScriptedBackend::default(), &ClientConfig::default());
        let t0 = Instant::now();
        session.type_text(t0, "unknown title");
        session.advance(t0 + Duration::from_secs(1));
        assert_eq!(session.backend().suggest_calls.borrow().len(), 1);
        assert!(!session.controller().dropdown().is_visible());
        assert_eq!(session.controller().page().message, None);
    }

    #[test]
    fn test_session_over_http() {
        let server = MockServer::start(|request| match (request.method(), request.url().as_str()) {
            ("GET", "/suggest") => Response::json(&serde_json::json!([{"title": "Inception", "year": "2010", "poster": "N/A"}])),
            ("POST", "/search") if request_body(request).contains("movie_title=Inception&movie_year=2010") => {
                Response::json(&serde_json::json!({
                    "movie_details": {"Title": "Inception", "Released": "16 Jul 2010"},
                    "downloads": [{"name": "SiteA", "url": "http://a"}],
                    "streaming": []
                }))
            }
            _ => Response::empty_404(),
        });
        let config = ClientConfig {
            base_url: server.base_url.clone(),
            categories: vec!["downloads".into(), "streaming".into()],
            ..ClientConfig::default()
        };
        let mut session = Session::new(HttpBackend::new(&config).unwrap(), &config);

        let t0 = Instant::now();
        session.type_text(t0, "incep");
        session.advance(t0 + config.debounce);
        session.click(0);

        let page = session.controller().page();
        assert_eq!(page.message, None);
        assert!(matches!(&page.sections[1], ResultSection::Empty { .. }));
        let text = render_text(page);
        assert!(text.contains("  Title: Inception\n"));
        assert!(text.contains("1. SiteA http://a"));
        assert!(text.contains("No results found for streaming."));
    }
}
