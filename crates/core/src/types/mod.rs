//! Core types for the Spotlyt admin dashboard.

pub mod email;
pub mod id;
pub mod news;
pub mod principal;
pub mod role;
pub mod rows;

pub use email::{Email, EmailError};
pub use id::{NewsId, UserId};
pub use news::{NewsDraft, NewsFeature, NewsItem, NewsPatch, display_cmp, sort_for_display};
pub use principal::Principal;
pub use role::AdminRole;
pub use rows::{
    CREATOR_LIMIT, CreatorRow, CreatorType, JOB_LIMIT, JobRow, REVENUE_SAMPLE_LIMIT,
    SummaryMetrics, TRANSACTION_LIMIT, TransactionAmount, TransactionRow, naira_revenue,
};
