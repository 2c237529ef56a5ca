//! Backend seam - the remote auth + data service as an injectable trait.
//!
//! Everything the dashboard knows about the outside world goes through
//! [`Backend`]. Production wires in [`crate::supabase::SupabaseClient`];
//! tests substitute an in-memory double. The trait is deliberately typed
//! per operation rather than exposing a generic query builder: the
//! dashboard issues a fixed, known set of reads and writes.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use spotlyt_core::{
    CreatorRow, Email, JobRow, NewsDraft, NewsId, NewsItem, NewsPatch, Principal,
    TransactionAmount, TransactionRow,
};

/// Errors surfaced by backend operations.
///
/// Nothing here is retried; callers surface the message where the
/// operation was triggered (sign-in form, load banner, news section) and
/// recovery is user-initiated.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (connect, DNS, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The response could not be understood (bad JSON, missing headers).
    #[error("unexpected response: {0}")]
    Response(String),

    /// The backend answered with an error.
    #[error("{message}")]
    Api {
        /// HTTP status the backend returned.
        status: u16,
        /// Error message from the backend's error body.
        message: String,
    },
}

/// Filter applied to `users` count queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorFilter {
    /// Every user row.
    All,
    /// Rows with `is_influencer = true`.
    Influencers,
    /// Rows with `is_talent = true`.
    Talent,
}

/// Result of the transaction aggregate query: the exact table count plus
/// the bounded recency sample the revenue figure is computed from.
#[derive(Debug, Clone)]
pub struct TransactionSample {
    /// Exact total row count of the table.
    pub total: u64,
    /// Up to the requested limit of the most recent `(amount, currency)`
    /// rows, newest first.
    pub rows: Vec<TransactionAmount>,
}

/// The remote authentication + relational-data service.
#[async_trait]
pub trait Backend: Send + Sync {
    // -- Auth ----------------------------------------------------------------

    /// Request a passwordless sign-in link for `email`, redirecting back to
    /// `redirect_to` once the user confirms.
    async fn send_magic_link(&self, email: &Email, redirect_to: &str) -> Result<(), BackendError>;

    /// Resolve an access token to the principal it was issued for.
    async fn get_principal(&self, access_token: &str) -> Result<Principal, BackendError>;

    /// Invalidate the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    // -- Role lookup ---------------------------------------------------------

    /// Role recorded in `admin_profiles` for a principal, if any.
    async fn admin_profile_role(&self, principal_id: Uuid) -> Result<Option<String>, BackendError>;

    // -- Aggregates ----------------------------------------------------------

    /// Exact count of `users` rows matching the filter.
    async fn count_users(&self, filter: CreatorFilter) -> Result<u64, BackendError>;

    /// Exact count of `marketing_jobs` rows with status `active`.
    async fn count_active_jobs(&self) -> Result<u64, BackendError>;

    /// Exact count of `influencer_applications` rows with status `pending`.
    async fn count_pending_applications(&self) -> Result<u64, BackendError>;

    /// Exact transaction count plus the newest `limit` amount rows.
    async fn recent_transaction_amounts(
        &self,
        limit: u32,
    ) -> Result<TransactionSample, BackendError>;

    // -- Recent lists --------------------------------------------------------

    /// Newest creators, creation descending.
    async fn recent_creators(&self, limit: u32) -> Result<Vec<CreatorRow>, BackendError>;

    /// Newest jobs, creation descending.
    async fn recent_jobs(&self, limit: u32) -> Result<Vec<JobRow>, BackendError>;

    /// Newest wallet transactions, creation descending.
    async fn recent_transactions(&self, limit: u32) -> Result<Vec<TransactionRow>, BackendError>;

    /// Every news item. Callers re-sort into display order regardless of
    /// what the backend returns.
    async fn list_news(&self) -> Result<Vec<NewsItem>, BackendError>;

    // -- News writes ---------------------------------------------------------

    /// Insert a new announcement.
    async fn insert_news(&self, draft: NewsDraft) -> Result<(), BackendError>;

    /// Apply a partial update to an announcement.
    async fn update_news(&self, id: NewsId, patch: NewsPatch) -> Result<(), BackendError>;

    /// Delete an announcement.
    async fn delete_news(&self, id: NewsId) -> Result<(), BackendError>;
}
