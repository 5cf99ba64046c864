//! Execution adapter with last-write-wins cancellation
//!
//! An executor keeps at most one request in flight. Issuing a new request
//! aborts the pending one, which then resolves to an `Aborted` error instead
//! of racing the newer response.

use super::response::{GraphQLRequest, GraphQLResponse, classify};
use super::transport::QueryTransport;
use crate::config::ExecutorConfig;
use crate::core::ExecutionError;
use futures::future::{AbortHandle, Abortable, Aborted};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::Instrument;
use uuid::Uuid;

struct InFlight {
    request_id: Uuid,
    handle: AbortHandle,
}

/// Frees the in-flight slot when `execute` finishes, aborts or is dropped
struct SlotGuard<'a> {
    executor: &'a QueryExecutor,
    request_id: Uuid,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        let mut slot = self.executor.slot();
        if slot.as_ref().is_some_and(|f| f.request_id == self.request_id) {
            *slot = None;
        }
    }
}

/// Sends compiled queries to one fixed endpoint
pub struct QueryExecutor {
    config: ExecutorConfig,
    transport: Arc<dyn QueryTransport>,
    in_flight: Mutex<Option<InFlight>>,
}

impl QueryExecutor {
    pub fn new(config: ExecutorConfig, transport: Arc<dyn QueryTransport>) -> Self {
        Self {
            config,
            transport,
            in_flight: Mutex::new(None),
        }
    }

    /// Executor over the default HTTPS transport
    #[cfg(feature = "http")]
    pub fn http(config: ExecutorConfig) -> anyhow::Result<Self> {
        let transport = super::transport::HttpTransport::new(&config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// POST `query` and classify the answer
    ///
    /// Aborts any request this executor still has in flight.
    pub async fn execute(
        &self,
        query: &str,
        bearer: Option<&str>,
    ) -> Result<GraphQLResponse, ExecutionError> {
        let request_id = Uuid::new_v4();
        let (handle, registration) = AbortHandle::new_pair();

        let previous = self.slot().replace(InFlight { request_id, handle });
        if let Some(previous) = previous {
            tracing::debug!(
                request_id = %previous.request_id,
                superseded_by = %request_id,
                "aborting superseded request"
            );
            previous.handle.abort();
        }
        let _guard = SlotGuard {
            executor: self,
            request_id,
        };

        let request = GraphQLRequest::new(query);
        let span = tracing::info_span!(
            "graphql_request",
            request_id = %request_id,
            endpoint = %self.config.endpoint
        );
        let outcome = Abortable::new(self.send(&request, bearer), registration)
            .instrument(span)
            .await;

        match outcome {
            Ok(result) => result,
            Err(Aborted) => Err(ExecutionError::aborted()),
        }
    }

    async fn send(
        &self,
        request: &GraphQLRequest,
        bearer: Option<&str>,
    ) -> Result<GraphQLResponse, ExecutionError> {
        tracing::info!(authenticated = bearer.is_some(), "sending query");

        let response = self
            .transport
            .post(&self.config.endpoint, request, bearer)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "transport failure"))?;

        let status = response.status;
        match classify(response) {
            Ok(parsed) => {
                tracing::info!(status, "query succeeded");
                Ok(parsed)
            }
            Err(err) => {
                tracing::warn!(status, kind = ?err.kind, error = %err, "query failed");
                Err(err)
            }
        }
    }

    /// Abort the pending request, if any
    ///
    /// Returns whether something was cancelled.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(in_flight) => {
                tracing::debug!(request_id = %in_flight.request_id, "request cancelled");
                in_flight.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.slot().is_some()
    }

    fn slot(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
