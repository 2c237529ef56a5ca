//! Read-only row projections of backend tables.
//!
//! Field lists mirror the columns the dashboard selects; everything here is
//! deserialized straight from the backend's JSON and never written back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::UserId;

/// How many recent creators the dashboard lists.
pub const CREATOR_LIMIT: u32 = 20;
/// How many recent jobs the dashboard lists.
pub const JOB_LIMIT: u32 = 15;
/// How many recent transactions the dashboard lists.
pub const TRANSACTION_LIMIT: u32 = 20;
/// The revenue sample window: revenue is approximated over this many of the
/// most recently created transactions, never the full table.
pub const REVENUE_SAMPLE_LIMIT: u32 = 100;

/// Creator kind recorded on a `users` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorType {
    Influencer,
    Talent,
}

impl CreatorType {
    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Influencer => "influencer",
            Self::Talent => "talent",
        }
    }
}

/// A recent creator (`users` table projection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorRow {
    pub id: UserId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub creator_type: Option<CreatorType>,
    #[serde(default)]
    pub is_influencer: bool,
    #[serde(default)]
    pub is_talent: bool,
    pub talent_skill: Option<String>,
    pub total_followers: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub daily_rate: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// A recent gig (`marketing_jobs` table projection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub offer: Option<Decimal>,
    pub currency: Option<String>,
}

/// A recent wallet movement (`wallet_transactions` table projection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: Uuid,
    pub user_id: UserId,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The slim `(amount, currency)` projection used by the revenue sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionAmount {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
}

/// Aggregate metrics shown on the summary cards.
///
/// `revenue_naira` is a recency-windowed approximation: the NGN sum over
/// the [`REVENUE_SAMPLE_LIMIT`] most recent transactions, not a full-table
/// aggregate. `total_transactions` is the exact table count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_users: u64,
    pub total_influencers: u64,
    pub total_talent: u64,
    pub active_jobs: u64,
    pub pending_applications: u64,
    pub total_transactions: u64,
    pub revenue_naira: Decimal,
}

/// Sum the naira amounts in a revenue sample.
///
/// Currency codes compare case-insensitively against "NGN"; rows with no
/// currency or no amount contribute nothing.
#[must_use]
pub fn naira_revenue(sample: &[TransactionAmount]) -> Decimal {
    sample
        .iter()
        .filter(|t| {
            t.currency
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case("NGN"))
        })
        .filter_map(|t| t.amount)
        .sum()
}
