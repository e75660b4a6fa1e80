//! HTTP client for the HRM backend.
//!
//! One thin function per (resource, verb) pair, grouped into the [`EmployeeApi`],
//! [`DepartmentApi`] and [`StatsApi`] traits so page controllers can be driven by
//! anything that speaks the same contract. Every call returns the backend's envelope
//! as-is. There is no retry and no caching; the only policy is the fixed timeout from
//! [`Config`].

pub mod department;
pub mod employee;
pub mod stats;

pub use department::DepartmentApi;
pub use employee::EmployeeApi;
pub use stats::StatsApi;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::ApiResponse;

/// Envelope of calls whose payload the front-end never reads.
pub type RawResponse = ApiResponse<serde_json::Value>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    health_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            health_url: config.health_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = %method, path, "Making request");
        self.client.request(method, self.url(path))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        let response = self.request(Method::GET, path).send().await;
        Self::handle_response(path, response).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<ApiResponse<T>> {
        let response = self.request(Method::GET, path).query(query).send().await;
        Self::handle_response(path, response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        let response = self.request(Method::POST, path).json(body).send().await;
        Self::handle_response(path, response).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        let response = self.request(Method::PUT, path).json(body).send().await;
        Self::handle_response(path, response).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        let response = self.request(Method::DELETE, path).send().await;
        Self::handle_response(path, response).await
    }

    pub(crate) async fn delete_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        let response = self.request(Method::DELETE, path).json(body).send().await;
        Self::handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Result<Response>,
    ) -> ClientResult<ApiResponse<T>> {
        let response = response.map_err(|e| {
            error!(path, error = %e, "API Error");
            ClientError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<RawResponse>(&body)
                .ok()
                .and_then(|env| env.error.or(env.message));
            error!(
                path,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "API Error"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // 204 and other bodiless successes
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse {
                data: None,
                error: None,
                message: None,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!(path, error = %e, "Unexpected response body");
            ClientError::from(e)
        })
    }

    /// Pings the backend root. `Ok(false)` means it answered with a failure status.
    pub async fn health(&self) -> ClientResult<bool> {
        debug!(url = %self.health_url, "Health check");
        let response = self.client.get(&self.health_url).send().await?;
        Ok(response.status().is_success())
    }
}
