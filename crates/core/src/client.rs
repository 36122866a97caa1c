//! HTTP client for the public WvW endpoints.

use std::future::Future;

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::{
    config::AppConfig,
    error::{Error, Result},
    models::{MatchDetail, MatchOverview},
};

/// Anything able to answer the three WvW queries.
///
/// [`Gw2Client`] is the network implementation; the snapshot builder and the
/// UI only depend on this trait.
pub trait MatchSource {
    /// IDs of every match currently running.
    fn list_active_match_ids(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Worlds and timing of one match.
    fn match_overview(&self, match_id: &str) -> impl Future<Output = Result<MatchOverview>> + Send;

    /// Complete statistics of one match.
    fn match_detail(&self, match_id: &str) -> impl Future<Output = Result<MatchDetail>> + Send;
}

/// Thin wrapper around `reqwest` bound to an API base URL.
///
/// Every call is a single unauthenticated GET. Nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct Gw2Client {
    http: Client,
    base_url: String,
}

impl Gw2Client {
    /// Build a client from configuration.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self::with_client(http, config.api_base_url.clone()))
    }

    /// Use an existing `reqwest` client.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /v2/wvw/matches`
    pub async fn list_active_match_ids(&self) -> Result<Vec<String>> {
        self.get_json("/v2/wvw/matches")
            .await
            .inspect_err(|err| error!(%err, "Error occurred while fetching WvW match list"))
    }

    /// `GET /v2/wvw/matches/overview?id={match_id}`
    pub async fn match_overview(&self, match_id: &str) -> Result<MatchOverview> {
        self.get_json(&format!("/v2/wvw/matches/overview?id={match_id}"))
            .await
            .inspect_err(
                |err| error!(%err, match_id, "Error occurred while fetching WvW match overview"),
            )
    }

    /// `GET /v2/wvw/matches/{match_id}`
    pub async fn match_detail(&self, match_id: &str) -> Result<MatchDetail> {
        self.get_json(&format!("/v2/wvw/matches/{match_id}"))
            .await
            .inspect_err(
                |err| error!(%err, match_id, "Error occurred while fetching WvW match data"),
            )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| Error::Network {
            url: url.clone(),
            source,
        })?;
        decode(&url, &body)
    }
}

impl MatchSource for Gw2Client {
    async fn list_active_match_ids(&self) -> Result<Vec<String>> {
        Gw2Client::list_active_match_ids(self).await
    }

    async fn match_overview(&self, match_id: &str) -> Result<MatchOverview> {
        Gw2Client::match_overview(self, match_id).await
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDetail> {
        Gw2Client::match_detail(self, match_id).await
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| Error::Parse {
        url: url.to_string(),
        source,
    })
}
