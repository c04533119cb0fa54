//! Search suggestions, fetched in the background
//!
//! A request is issued when a handle is created and the UI keeps rendering
//! with the previous (empty) state until the result lands. Dropping the
//! handle cancels the request and its result is discarded.

use crate::error::{FeedError, Result};
use crate::types::{Origin, Suggestion, SuggestionsResponse};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SuggestionsStatus {
    /// Disabled handles stay idle forever
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
    Cancelled,
}

#[derive(Debug, Default)]
struct SuggestionsState {
    status: SuggestionsStatus,
    items: Vec<Suggestion>,
}

/// Live suggestions object consumed by the search UI
pub struct SuggestionsHandle {
    origin: Origin,
    disabled: bool,
    state: Arc<Mutex<SuggestionsState>>,
    token: CancellationToken,
}

impl SuggestionsHandle {
    /// Handle that never touches the network
    pub fn disabled(origin: Origin) -> Self {
        Self {
            origin,
            disabled: true,
            state: Arc::new(Mutex::new(SuggestionsState::default())),
            token: CancellationToken::new(),
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn status(&self) -> SuggestionsStatus {
        self.state
            .lock()
            .map(|s| s.status.clone())
            .unwrap_or(SuggestionsStatus::Idle)
    }

    pub fn items(&self) -> Vec<Suggestion> {
        self.state
            .lock()
            .map(|s| s.items.clone())
            .unwrap_or_default()
    }

    pub fn cancel(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if let Ok(mut s) = self.state.lock() {
            if s.status == SuggestionsStatus::Loading {
                s.status = SuggestionsStatus::Cancelled;
            }
        }
    }
}

impl Drop for SuggestionsHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

pub trait SearchSuggestions {
    fn suggestions(&self, origin: Origin, disabled: bool) -> SuggestionsHandle;
}

/// Suggestions from an HTTP endpoint returning `{"hits": [{"title": ..}]}`
pub struct HttpSuggestions {
    client: reqwest::Client,
    endpoint: String,
    runtime: tokio::runtime::Handle,
    on_update: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl HttpSuggestions {
    pub fn new(endpoint: impl Into<String>, runtime: tokio::runtime::Handle) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            runtime,
            on_update: None,
        }
    }

    /// Callback run after a result is stored, e.g. to request a repaint
    pub fn with_update_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_update = Some(Arc::new(hook));
        self
    }
}

async fn fetch_suggestions(
    client: &reqwest::Client,
    endpoint: &str,
    origin: Origin,
) -> Result<Vec<Suggestion>> {
    let response = client
        .get(endpoint)
        .query(&[("origin", origin.as_str())])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(FeedError::SuggestionsStatus(response.status().as_u16()));
    }
    let body: SuggestionsResponse = response.json().await?;
    Ok(body.hits)
}

impl SearchSuggestions for HttpSuggestions {
    fn suggestions(&self, origin: Origin, disabled: bool) -> SuggestionsHandle {
        if disabled {
            return SuggestionsHandle::disabled(origin);
        }

        let state = Arc::new(Mutex::new(SuggestionsState {
            status: SuggestionsStatus::Loading,
            items: Vec::new(),
        }));
        let token = CancellationToken::new();

        let task_state = state.clone();
        let task_token = token.clone();
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let on_update = self.on_update.clone();

        debug!(origin = origin.as_str(), endpoint = %endpoint, "Fetching search suggestions");

        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = task_token.cancelled() => {
                    debug!("Suggestions request cancelled");
                    return;
                }
                result = fetch_suggestions(&client, &endpoint, origin) => result,
            };

            let Ok(mut s) = task_state.lock() else {
                return;
            };
            // The handle may have been dropped while the response was decoded
            if task_token.is_cancelled() {
                return;
            }
            match result {
                Ok(items) => {
                    debug!(count = items.len(), "Search suggestions loaded");
                    s.items = items;
                    s.status = SuggestionsStatus::Ready;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load search suggestions");
                    s.status = SuggestionsStatus::Failed(e.to_string());
                }
            }
            drop(s);
            if let Some(hook) = on_update {
                hook();
            }
        });

        SuggestionsHandle {
            origin,
            disabled: false,
            state,
            token,
        }
    }
}
