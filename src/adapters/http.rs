use crate::domain::ports::PageFetcher;
use crate::utils::error::{PriceError, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

/// Plain GET client for upstream rate pages.
///
/// Every request carries a browser identity picked at random from the
/// configured pool, which keeps the simplest bot filters from rejecting us.
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agents: Vec<String>) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_agents,
        })
    }

    fn pick_user_agent(&self) -> Option<&str> {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(user_agent) = self.pick_user_agent() {
            tracing::debug!("Using user agent: {}", user_agent);
            request = request.header(header::USER_AGENT, user_agent);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Upstream {} answered {}", url, status);

        if status != StatusCode::OK {
            return Err(PriceError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
