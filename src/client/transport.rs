//! Transport seam between the executor and the network

use super::response::{GraphQLRequest, TransportResponse};
use crate::core::ExecutionError;
use async_trait::async_trait;

/// Sends one request body to an endpoint
///
/// Implementations report network-level failures as transport errors and
/// hand back every HTTP answer, successful or not, for classification.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn post(
        &self,
        endpoint: &str,
        request: &GraphQLRequest,
        bearer: Option<&str>,
    ) -> Result<TransportResponse, ExecutionError>;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use crate::config::ExecutorConfig;
    use anyhow::Result;
    use reqwest::header::CONTENT_TYPE;

    /// HTTPS transport backed by `reqwest`
    ///
    /// No timeout is configured; the transport's own limits apply.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
    }

    impl HttpTransport {
        pub fn new(config: &ExecutorConfig) -> Result<Self> {
            let client = reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .build()?;
            Ok(Self { client })
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl QueryTransport for HttpTransport {
        async fn post(
            &self,
            endpoint: &str,
            request: &GraphQLRequest,
            bearer: Option<&str>,
        ) -> Result<TransportResponse, ExecutionError> {
            let mut builder = self
                .client
                .post(endpoint)
                .header(CONTENT_TYPE, "application/json")
                .json(request);

            if let Some(token) = bearer {
                builder = builder.bearer_auth(token);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ExecutionError::transport(format!("Request failed: {}", e)))?;

            let status = response.status();
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let body = response.text().await.map_err(|e| {
                let mut err =
                    ExecutionError::transport(format!("Failed to read response body: {}", e));
                err.status = Some(status.as_u16());
                err
            })?;

            Ok(TransportResponse {
                status: status.as_u16(),
                status_text,
                body,
            })
        }
    }
}
