use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use super::constants::headers;
use super::models::{Environment, Plant};
use super::query::{Query, QueryBuilder};
use super::resilience::{RetryConfig, RetryPolicy};
use crate::config::ApiConfig;

/// Read-only access to the plants data source.
///
/// The screens only talk to this trait, so tests can swap the network for an
/// in-memory implementation.
#[async_trait]
pub trait PlantsApi: Send + Sync {
    /// All environments, sorted ascending by title
    async fn fetch_environments(&self) -> anyhow::Result<Vec<Environment>>;

    /// One page of plants sorted ascending by name.
    ///
    /// `Ok(None)` means the server answered with a `null` body.
    async fn fetch_plants(&self, page: u32) -> anyhow::Result<Option<Vec<Plant>>>;
}

/// HTTP client for the plants API with connection pooling and retries
pub struct PlantsClient {
    base_url: String,
    http_client: reqwest::Client,
    retry_policy: RetryPolicy,
}

impl PlantsClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(headers::USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(
            &config.base_url,
            http_client,
            RetryPolicy::new(RetryConfig::with_max_attempts(config.max_retries)),
        ))
    }

    /// Create a client around a preconfigured reqwest client
    pub fn with_custom_client(
        base_url: impl Into<String>,
        http_client: reqwest::Client,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            retry_policy,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a query and decode the JSON body
    pub async fn execute_query<T: DeserializeOwned>(&self, query: &Query) -> anyhow::Result<T> {
        let url = query.to_url(&self.base_url);
        debug!("GET {}", url);

        let response = self
            .retry_policy
            .execute(|| async {
                self.http_client
                    .get(&url)
                    .header("Accept", headers::CONTENT_TYPE_JSON)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
            })
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

#[async_trait]
impl PlantsApi for PlantsClient {
    async fn fetch_environments(&self) -> anyhow::Result<Vec<Environment>> {
        let query = QueryBuilder::environments().build();
        let environments: Option<Vec<Environment>> = self.execute_query(&query).await?;
        Ok(environments.unwrap_or_default())
    }

    async fn fetch_plants(&self, page: u32) -> anyhow::Result<Option<Vec<Plant>>> {
        let query = QueryBuilder::plants_page(page).build();
        self.execute_query(&query).await
    }
}
