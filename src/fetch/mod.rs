// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand the pipeline one HTML document.
pub trait PageSource {
    fn fetch(&self) -> Result<String>;
}

/// Single GET against a fixed URL. No retries.
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("parsing source URL {}", url))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PageSource for HttpSource {
    #[tracing::instrument(level = "info", skip(self), fields(url = %self.url))]
    fn fetch(&self) -> Result<String> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .with_context(|| format!("GET {}", self.url))?
            .error_for_status()?;
        debug!(status = %resp.status(), "response received");

        let html = resp
            .text()
            .with_context(|| format!("reading body from {}", self.url))?;
        info!(bytes = html.len(), "page fetched");
        Ok(html)
    }
}

/// A document already in memory.
pub struct StaticSource(pub String);

impl PageSource for StaticSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
