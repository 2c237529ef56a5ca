//! Dashboard route handlers and view models.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use spotlyt_core::{
    CreatorRow, JobRow, NewsFeature, NewsItem, SummaryMetrics, TransactionRow,
};

use crate::{
    error::AppError,
    middleware::RequireAdmin,
    models::CurrentAdmin,
    state::AppState,
};

/// Signed-in admin view for the page header.
#[derive(Debug, Clone)]
pub struct AdminView {
    pub email: String,
    pub role: String,
}

impl From<&CurrentAdmin> for AdminView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            email: admin
                .email
                .clone()
                .unwrap_or_else(|| "admin".to_string()),
            role: admin.role.to_string(),
        }
    }
}

/// Summary metric cards, preformatted.
#[derive(Debug, Clone)]
pub struct MetricsView {
    pub total_users: String,
    pub total_influencers: String,
    pub total_talent: String,
    pub active_jobs: String,
    pub pending_applications: String,
    pub total_transactions: String,
    pub revenue: String,
}

impl From<&SummaryMetrics> for MetricsView {
    fn from(metrics: &SummaryMetrics) -> Self {
        Self {
            total_users: format_count(metrics.total_users),
            total_influencers: format_count(metrics.total_influencers),
            total_talent: format_count(metrics.total_talent),
            active_jobs: format_count(metrics.active_jobs),
            pending_applications: format_count(metrics.pending_applications),
            total_transactions: format_count(metrics.total_transactions),
            revenue: format_money(Some("NGN"), Some(metrics.revenue_naira)),
        }
    }
}

/// Row in the "Latest Creators" table.
#[derive(Debug, Clone)]
pub struct CreatorView {
    pub name: String,
    pub kind: String,
    pub skill: String,
    pub joined: String,
}

impl From<&CreatorRow> for CreatorView {
    fn from(row: &CreatorRow) -> Self {
        Self {
            name: row.full_name.clone().unwrap_or_else(|| "—".to_string()),
            kind: row
                .creator_type
                .map_or_else(|| "—".to_string(), |t| t.label().to_string()),
            skill: row.talent_skill.clone().unwrap_or_else(|| "—".to_string()),
            joined: format_date(&row.created_at),
        }
    }
}

/// Row in the "Active Jobs" table.
#[derive(Debug, Clone)]
pub struct JobView {
    pub title: String,
    pub status: String,
    pub offer: String,
    pub created: String,
}

impl From<&JobRow> for JobView {
    fn from(row: &JobRow) -> Self {
        Self {
            title: row.title.clone(),
            status: row.status.clone(),
            offer: format_money(row.currency.as_deref(), row.offer),
            created: format_date(&row.created_at),
        }
    }
}

/// Row in the "Recent Transactions" table.
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub user: String,
    pub amount: String,
    pub status: String,
    pub date: String,
}

impl From<&TransactionRow> for TransactionView {
    fn from(row: &TransactionRow) -> Self {
        Self {
            user: row.user_id.to_string(),
            amount: format_money(row.currency.as_deref(), row.amount),
            status: row.status.clone(),
            date: format_datetime(&row.created_at),
        }
    }
}

/// Option in a feature `<select>`.
#[derive(Debug, Clone)]
pub struct FeatureOption {
    pub value: String,
    pub label: String,
}

impl FeatureOption {
    /// Every feature, in form order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        NewsFeature::ALL
            .into_iter()
            .map(|f| Self {
                value: f.as_str().to_string(),
                label: f.label().to_string(),
            })
            .collect()
    }
}

/// News item view: display fields plus everything the edit form needs.
#[derive(Debug, Clone)]
pub struct NewsView {
    pub id: String,
    pub title: String,
    pub body: String,
    pub feature_value: String,
    pub feature_label: String,
    pub status: String,
    pub is_published: bool,
    pub is_pinned: bool,
    pub timestamp: String,
    pub image_url: String,
    pub cta_label: String,
    pub cta_url: String,
}

impl From<&NewsItem> for NewsView {
    fn from(item: &NewsItem) -> Self {
        let timestamp = item.published_at.as_ref().map_or_else(
            || format!("Created {}", format_datetime(&item.created_at)),
            format_datetime,
        );
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            body: item.body.clone(),
            feature_value: item.feature.as_str().to_string(),
            feature_label: item.feature.label().to_string(),
            status: if item.is_published { "Published" } else { "Draft" }.to_string(),
            is_published: item.is_published,
            is_pinned: item.is_pinned,
            timestamp,
            image_url: item.image_url.clone().unwrap_or_default(),
            cta_label: item.cta_label.clone().unwrap_or_default(),
            cta_url: item.cta_url.clone().unwrap_or_default(),
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin: AdminView,
    pub metrics: Option<MetricsView>,
    pub error: Option<String>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub creators: Vec<CreatorView>,
    pub jobs: Vec<JobView>,
    pub transactions: Vec<TransactionView>,
    pub news: Vec<NewsView>,
    pub features: Vec<FeatureOption>,
    pub news_error: Option<String>,
    pub news_notice: Option<String>,
}

// =============================================================================
// Format helpers
// =============================================================================

/// Group a plain digit run with thousands separators.
fn group_digits(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a count with thousands separators.
fn format_count(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format a decimal with thousands separators, trailing zeros trimmed.
fn format_decimal(amount: Decimal) -> String {
    let plain = amount.normalize().to_string();
    let (sign, rest) = plain
        .strip_prefix('-')
        .map_or(("", plain.as_str()), |r| ("-", r));
    let (int_part, frac_part) = rest
        .split_once('.')
        .map_or((rest, None), |(i, f)| (i, Some(f)));
    let grouped = group_digits(int_part);
    frac_part.map_or_else(
        || format!("{sign}{grouped}"),
        |f| format!("{sign}{grouped}.{f}"),
    )
}

/// Format a money cell: `NGN 12,000`. Missing currency defaults to NGN,
/// missing amount to zero.
fn format_money(currency: Option<&str>, amount: Option<Decimal>) -> String {
    format!(
        "{} {}",
        currency.unwrap_or("NGN"),
        format_decimal(amount.unwrap_or_default())
    )
}

/// Format a date cell.
fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Format a date-time cell.
fn format_datetime(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %H:%M").to_string()
}

// =============================================================================
// Handlers
// =============================================================================

/// Inline news-section messages carried across the post/redirect/get hop.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub news_error: Option<String>,
    pub news_notice: Option<String>,
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip(admin, state, query))]
pub async fn dashboard(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let dashboard = state.dashboard();
    dashboard.ensure_loaded().await;
    let view = dashboard.snapshot().await;

    let template = DashboardTemplate {
        admin: AdminView::from(&admin),
        metrics: view.metrics.as_ref().map(MetricsView::from),
        error: view.error,
        is_loading: view.is_loading,
        is_refreshing: view.is_refreshing,
        creators: view.creators.iter().map(CreatorView::from).collect(),
        jobs: view.jobs.iter().map(JobView::from).collect(),
        transactions: view.transactions.iter().map(TransactionView::from).collect(),
        news: view.news.iter().map(NewsView::from).collect(),
        features: FeatureOption::all(),
        news_error: query.news_error,
        news_notice: query.news_notice,
    };

    let html = template
        .render()
        .map_err(|e| AppError::Internal(format!("template render: {e}")))?;
    Ok(Html(html))
}

/// Manual refresh handler. Re-runs the identical full load; the
/// `is_refreshing` guard inside the service makes this non-reentrant.
///
/// POST /refresh
#[instrument(skip(_admin, state))]
pub async fn refresh(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Redirect {
    state.dashboard().refresh().await;
    Redirect::to("/")
}
