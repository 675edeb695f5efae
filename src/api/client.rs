//! HTTP client for the Autify REST API

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::common::config::ApiConfig;
use crate::common::{Error, Result};

use super::types::{RunHandle, RunTestPlanResponse, Scenario, TestPlanResult};

const USER_AGENT: &str = concat!("autify-cli/", env!("CARGO_PKG_VERSION"));

/// Remote operations the commands need from Autify
#[async_trait]
pub trait AutifyApi: Send + Sync {
    /// Start a run of a test plan
    async fn run_test_plan(&self, plan_id: u64) -> Result<RunHandle>;

    /// Fetch the current state of a test plan result
    async fn fetch_result(&self, project_id: u64, result_id: u64) -> Result<TestPlanResult>;

    /// Fetch scenario metadata
    async fn fetch_scenario(&self, project_id: u64, scenario_id: u64) -> Result<Scenario>;
}

/// `reqwest`-backed implementation of [`AutifyApi`]
pub struct AutifyClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl AutifyClient {
    /// Create a client for `base_url` authenticating with `access_token`
    pub fn new(
        access_token: impl Into<String>,
        base_url: &str,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            access_token: access_token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the `[api]` configuration section
    pub fn from_config(access_token: impl Into<String>, config: &ApiConfig) -> Result<Self> {
        Self::new(
            access_token,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode the JSON response body
    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "Request to autify");

        let response = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| Error::network(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(&url, e))?;

        debug!(method = %method, url = %url, status = %status, "Response from autify");
        debug!(body = %body, "Response body");

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            return Err(Error::Api {
                method: method.to_string(),
                url,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::decode(&url, e))
    }
}

#[async_trait]
impl AutifyApi for AutifyClient {
    async fn run_test_plan(&self, plan_id: u64) -> Result<RunHandle> {
        let response: RunTestPlanResponse = self
            .send(Method::POST, &format!("schedules/{}", plan_id))
            .await?;
        Ok(response.data)
    }

    async fn fetch_result(&self, project_id: u64, result_id: u64) -> Result<TestPlanResult> {
        self.send(
            Method::GET,
            &format!("projects/{}/results/{}", project_id, result_id),
        )
        .await
    }

    async fn fetch_scenario(&self, project_id: u64, scenario_id: u64) -> Result<Scenario> {
        self.send(
            Method::GET,
            &format!("projects/{}/scenarios/{}", project_id, scenario_id),
        )
        .await
    }
}
