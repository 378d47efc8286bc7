//! Cancellable list loading for portal views.
//!
//! A view that navigates away cancels its in-flight fetch. Cancellation drops
//! the request future (which aborts the underlying HTTP call) and is reported
//! as [`FetchOutcome::Aborted`], which leaves the view state untouched and is
//! not logged as a failure.

use crate::{Backend, BackendError};
use portal_core::models::ClientSummary;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Result of a cancellable fetch
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Failed(BackendError),
    Aborted,
}

impl<T> FetchOutcome<T> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, FetchOutcome::Aborted)
    }
}

/// View state for a fetched list
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub error: Option<String>,
    pub loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            loading: false,
        }
    }
}

impl<T> ListState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetch outcome. Returns whether the state changed.
    pub fn apply(&mut self, outcome: FetchOutcome<Vec<T>>) -> bool {
        match outcome {
            FetchOutcome::Loaded(items) => {
                self.items = items;
                self.error = None;
                self.loading = false;
                true
            }
            FetchOutcome::Failed(err) => {
                tracing::warn!(error = %err, "List fetch failed");
                self.error = Some(err.to_string());
                self.loading = false;
                true
            }
            FetchOutcome::Aborted => false,
        }
    }
}

/// Loads a tenant's client list; starting a new load or calling
/// [`abort`](ClientListLoader::abort) cancels the previous one.
pub struct ClientListLoader {
    backend: Arc<dyn Backend>,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl ClientListLoader {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            in_flight: Mutex::new(None),
        }
    }

    fn replace_in_flight(&self, next: Option<CancellationToken>) {
        let mut guard = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = guard.take() {
            previous.cancel();
        }
        *guard = next;
    }

    /// Cancel the in-flight load, if any (navigation away)
    pub fn abort(&self) {
        self.replace_in_flight(None);
    }

    pub async fn load(&self, token: &str, tenant_id: &str) -> FetchOutcome<Vec<ClientSummary>> {
        let cancel = CancellationToken::new();
        self.replace_in_flight(Some(cancel.clone()));
        fetch_clients(self.backend.as_ref(), token, tenant_id, &cancel).await
    }
}

/// Fetch the client list unless `cancel` fires first
pub async fn fetch_clients(
    backend: &dyn Backend,
    token: &str,
    tenant_id: &str,
    cancel: &CancellationToken,
) -> FetchOutcome<Vec<ClientSummary>> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => FetchOutcome::Aborted,
        result = backend.list_clients(token, tenant_id) => match result {
            Ok(clients) => FetchOutcome::Loaded(clients),
            Err(err) => FetchOutcome::Failed(err),
        },
    }
}
