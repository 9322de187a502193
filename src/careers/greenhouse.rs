use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use super::{Career, CareerError, CareerListingService, Office};
use crate::config::Config;
use crate::retry::{with_retry_if, RetryConfig};

#[derive(Debug, Deserialize)]
struct JobsResponse {
    #[serde(default)]
    jobs: Vec<Career>,
}

#[derive(Debug, Deserialize)]
struct OfficesResponse {
    #[serde(default)]
    offices: Vec<Office>,
}

/// Greenhouse job board API client.
#[derive(Debug, Clone)]
pub struct GreenhouseClient {
    client: reqwest::Client,
    base_url: String,
    board: String,
    devrel_department: String,
    retry: RetryConfig,
}

impl GreenhouseClient {
    pub fn new(
        base_url: &str,
        board: &str,
        devrel_department: &str,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("developer-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build Greenhouse HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            board: board.to_string(),
            devrel_department: devrel_department.to_string(),
            retry: RetryConfig::page_fetch(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.greenhouse_api_url,
            &config.greenhouse_board,
            &config.greenhouse_devrel_department,
            config.careers_timeout,
        )
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/v1/boards/{}/{}", self.base_url, self.board, resource)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CareerError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CareerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CareerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CareerError::Decode(e.to_string()))
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<T, CareerError> {
        let url = self.url(resource);
        with_retry_if(
            &self.retry,
            &format!("Greenhouse {}", resource),
            || self.get_json::<T>(&url),
            CareerError::is_retryable,
        )
        .await
    }
}

#[async_trait]
impl CareerListingService for GreenhouseClient {
    async fn careers(&self) -> Result<Vec<Career>, CareerError> {
        let response: JobsResponse = self.fetch("jobs?content=true").await?;
        info!("Fetched {} careers from Greenhouse", response.jobs.len());
        Ok(response.jobs)
    }

    async fn offices(&self) -> Result<Vec<Office>, CareerError> {
        let response: OfficesResponse = self.fetch("offices").await?;
        Ok(response.offices)
    }

    async fn devrel_careers(&self) -> Result<Vec<Career>, CareerError> {
        let careers = self.careers().await?;
        Ok(careers
            .into_iter()
            .filter(|c| c.in_department(&self.devrel_department))
            .collect())
    }
}
