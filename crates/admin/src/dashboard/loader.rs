//! The data loader: two waves of concurrent backend reads.

use spotlyt_core::{
    CREATOR_LIMIT, CreatorRow, JOB_LIMIT, JobRow, NewsItem, REVENUE_SAMPLE_LIMIT, SummaryMetrics,
    TRANSACTION_LIMIT, TransactionRow, naira_revenue, sort_for_display,
};

use crate::backend::{Backend, BackendError, CreatorFilter};

/// A fully assembled dashboard load.
pub(super) struct Snapshot {
    pub metrics: SummaryMetrics,
    pub creators: Vec<CreatorRow>,
    pub jobs: Vec<JobRow>,
    pub transactions: Vec<TransactionRow>,
    pub news: Vec<NewsItem>,
}

/// Fetch everything the dashboard shows.
///
/// Wave 1 runs the six aggregate queries concurrently; the first failure
/// (in the fixed order below) aborts the load before wave 2 is issued.
/// Wave 2 runs the four list queries concurrently once the aggregates are
/// in. No list query reads wave 1 data; the sequencing keeps a failed
/// load from issuing half its reads.
pub(super) async fn fetch_snapshot(backend: &dyn Backend) -> Result<Snapshot, BackendError> {
    let (users, influencers, talent, active_jobs, pending_applications, sample) = tokio::join!(
        backend.count_users(CreatorFilter::All),
        backend.count_users(CreatorFilter::Influencers),
        backend.count_users(CreatorFilter::Talent),
        backend.count_active_jobs(),
        backend.count_pending_applications(),
        backend.recent_transaction_amounts(REVENUE_SAMPLE_LIMIT),
    );

    let total_users = users?;
    let total_influencers = influencers?;
    let total_talent = talent?;
    let active_jobs = active_jobs?;
    let pending_applications = pending_applications?;
    let sample = sample?;

    let metrics = SummaryMetrics {
        total_users,
        total_influencers,
        total_talent,
        active_jobs,
        pending_applications,
        total_transactions: sample.total,
        revenue_naira: naira_revenue(&sample.rows),
    };

    let (creators, jobs, transactions, news) = tokio::join!(
        backend.recent_creators(CREATOR_LIMIT),
        backend.recent_jobs(JOB_LIMIT),
        backend.recent_transactions(TRANSACTION_LIMIT),
        backend.list_news(),
    );

    let creators = creators?;
    let jobs = jobs?;
    let transactions = transactions?;
    let mut news = news?;

    // The backend already orders the news query, but the display ordering
    // is a contract with the mobile app - enforce it here regardless.
    sort_for_display(&mut news);

    Ok(Snapshot {
        metrics,
        creators,
        jobs,
        transactions,
        news,
    })
}
