//! The dashboard service: view state plus the operations that mutate it.
//!
//! This is the explicit session-state object the rest of the app reads:
//! one process-wide `Dashboard` owning the metrics, the recent-record
//! lists, and the load/refresh flags behind an async `RwLock`. Only the
//! loader and the news mutations write it; handlers and templates read
//! snapshots.
//!
//! Loads are not cancellable: two overlapping loads each compute a full
//! snapshot and the later write wins. Re-entrancy from the UI is prevented
//! by the `is_refreshing` guard alone.

mod loader;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::instrument;

use spotlyt_core::{
    CreatorRow, JobRow, NewsDraft, NewsId, NewsItem, NewsPatch, SummaryMetrics, TransactionRow,
};

use crate::backend::{Backend, BackendError};

/// Everything the dashboard page renders from.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Aggregate metrics; `None` until the first successful load.
    pub metrics: Option<SummaryMetrics>,
    /// Newest creators, capped.
    pub creators: Vec<CreatorRow>,
    /// Newest jobs, capped.
    pub jobs: Vec<JobRow>,
    /// Newest wallet transactions, capped.
    pub transactions: Vec<TransactionRow>,
    /// News feed in display order.
    pub news: Vec<NewsItem>,
    /// A load is in flight.
    pub is_loading: bool,
    /// A UI-triggered refresh is in flight (disables the refresh control).
    pub is_refreshing: bool,
    /// Banner message from the last failed load, if any.
    pub error: Option<String>,
    /// At least one load has completed successfully.
    pub loaded_once: bool,
}

/// Process-wide dashboard state and operations.
pub struct Dashboard {
    backend: Arc<dyn Backend>,
    state: RwLock<ViewState>,
}

impl Dashboard {
    /// Create an empty dashboard over a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: RwLock::new(ViewState::default()),
        }
    }

    /// Clone the current view state for rendering.
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Run the initial load if no load has succeeded yet.
    pub async fn ensure_loaded(&self) {
        let loaded = self.state.read().await.loaded_once;
        if !loaded {
            self.reload().await;
        }
    }

    /// Run the full load and record the outcome.
    ///
    /// A failure records the banner message and clears the loading flag;
    /// previously loaded metrics and lists stay as they were. Success
    /// replaces the whole snapshot.
    #[instrument(skip(self))]
    pub async fn reload(&self) {
        {
            let mut state = self.state.write().await;
            state.error = None;
            state.is_loading = true;
        }

        match loader::fetch_snapshot(self.backend.as_ref()).await {
            Ok(snapshot) => {
                let mut state = self.state.write().await;
                state.metrics = Some(snapshot.metrics);
                state.creators = snapshot.creators;
                state.jobs = snapshot.jobs;
                state.transactions = snapshot.transactions;
                state.news = snapshot.news;
                state.is_loading = false;
                state.loaded_once = true;
            }
            Err(e) => {
                tracing::error!(error = %e, "dashboard load failed");
                let mut state = self.state.write().await;
                state.error = Some(e.to_string());
                state.is_loading = false;
            }
        }
    }

    /// UI-triggered refresh: identical to [`Self::reload`], but a no-op
    /// while another refresh is in flight.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.write().await;
            if state.is_refreshing {
                return;
            }
            state.is_refreshing = true;
        }

        self.reload().await;

        self.state.write().await.is_refreshing = false;
    }

    /// Create an announcement, then reload the whole dashboard.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the insert is rejected; loaded state is
    /// untouched in that case.
    pub async fn create_news(&self, draft: NewsDraft) -> Result<(), BackendError> {
        self.backend.insert_news(draft).await?;
        self.reload().await;
        Ok(())
    }

    /// Apply a partial update, then reload the whole dashboard.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the update is rejected; loaded state is
    /// untouched in that case.
    pub async fn update_news(&self, id: NewsId, patch: NewsPatch) -> Result<(), BackendError> {
        self.backend.update_news(id, patch).await?;
        self.reload().await;
        Ok(())
    }

    /// Delete an announcement.
    ///
    /// The only optimistic mutation: on success the item is filtered out of
    /// the local list and NO reload is issued.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the delete is rejected; loaded state is
    /// untouched in that case.
    pub async fn delete_news(&self, id: NewsId) -> Result<(), BackendError> {
        self.backend.delete_news(id).await?;
        self.state.write().await.news.retain(|item| item.id != id);
        Ok(())
    }
}
