use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::query::SearchQuery;
use crate::suggest::{parse_suggestions, Suggestion};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Status and body of a `/search` reply, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

/// The two endpoints the client consumes.
pub trait Backend {
    /// Non-2xx answers and undecodable bodies are errors.
    fn suggest(&self, query: &str) -> Result<Vec<Suggestion>>;
    /// Only transport failures are errors; status handling is up to the caller.
    fn search(&self, query: &SearchQuery) -> Result<RawReply>;
}

pub struct HttpBackend {
    client: reqwest::blocking::Client,
    suggest_url: Url,
    search_url: Url,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<HttpBackend> {
        let mut builder = reqwest::blocking::Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(HttpBackend {
            client: builder.build()?,
            suggest_url: config.base_url.join("suggest")?,
            search_url: config.base_url.join("search")?,
        })
    }
}

impl Backend for HttpBackend {
    fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = Url::parse_with_params(self.suggest_url.as_str(), &[("q", query)])?;
        log::debug!("GET {url}");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        parse_suggestions(&resp.text()?)
    }

    fn search(&self, query: &SearchQuery) -> Result<RawReply> {
        log::info!(target: "cli", "Searching for {:?} (year: {:?})", query.title, query.year);
        let resp = self.client.post(self.search_url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(query.form_body())
            .send()?;
        let status = resp.status().as_u16();
        Ok(RawReply { status, body: resp.text()? })
    }
}
