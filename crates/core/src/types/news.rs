//! The news/announcement feed - the dashboard's only write path.
//!
//! News items are consumed by the Spotlyt mobile app; the admin dashboard
//! creates, edits, and removes them. Display ordering is a contract with
//! the app: pinned items first, then newest publish date, with unpublished
//! (null `published_at`) items trailing their pin group.

use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NewsId;

/// Feature tag on a news item - a fixed set the mobile app routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsFeature {
    SocialGrowth,
    SpotlytCourses,
    SpotlytJobs,
    ProductUpdate,
    Community,
    General,
}

impl NewsFeature {
    /// All features, in the order the create form offers them.
    pub const ALL: [Self; 6] = [
        Self::SocialGrowth,
        Self::SpotlytCourses,
        Self::SpotlytJobs,
        Self::ProductUpdate,
        Self::Community,
        Self::General,
    ];

    /// The wire value stored in the `feature` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SocialGrowth => "social_growth",
            Self::SpotlytCourses => "spotlyt_courses",
            Self::SpotlytJobs => "spotlyt_jobs",
            Self::ProductUpdate => "product_update",
            Self::Community => "community",
            Self::General => "general",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SocialGrowth => "Social Growth",
            Self::SpotlytCourses => "Spotlyt Courses",
            Self::SpotlytJobs => "Spotlyt Jobs",
            Self::ProductUpdate => "Product Update",
            Self::Community => "Community",
            Self::General => "General",
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

/// A `spotlyt_news` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub body: String,
    pub feature: NewsFeature,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_published: bool,
    pub is_pinned: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new announcement.
///
/// Optional fields serialize as explicit JSON `null` when absent - an
/// insert always writes every column. `is_published` is forced `true` by
/// the create path; drafts are only reachable by editing afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct NewsDraft {
    pub title: String,
    pub body: String,
    pub feature: NewsFeature,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_published: bool,
    pub is_pinned: bool,
}

/// Partial update payload for an existing announcement.
///
/// `None` means *leave the column untouched* - the field is omitted from
/// the serialized body entirely. For the nullable text columns the inner
/// option distinguishes "clear the column" (`Some(None)`, serialized as
/// JSON `null`) from "leave it" (`None`, omitted).
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<NewsFeature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl NewsPatch {
    /// True when the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.feature.is_none()
            && self.image_url.is_none()
            && self.cta_label.is_none()
            && self.cta_url.is_none()
            && self.is_published.is_none()
            && self.is_pinned.is_none()
    }
}

/// Total display ordering for news items.
///
/// Pinned before unpinned; within a pin group, later publish date first
/// with null publish dates after all dated items; creation date descending
/// breaks remaining ties.
#[must_use]
pub fn display_cmp(a: &NewsItem, b: &NewsItem) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| match (a.published_at, b.published_at) {
            (Some(a_pub), Some(b_pub)) => b_pub.cmp(&a_pub),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort a fetched news list into display order.
pub fn sort_for_display(news: &mut [NewsItem]) {
    news.sort_by(display_cmp);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn item(
        n: u128,
        pinned: bool,
        published_day: Option<u32>,
        created_day: u32,
    ) -> NewsItem {
        NewsItem {
            id: NewsId::new(Uuid::from_u128(n)),
            title: format!("item {n}"),
            body: String::new(),
            feature: NewsFeature::General,
            image_url: None,
            cta_label: None,
            cta_url: None,
            is_published: published_day.is_some(),
            is_pinned: pinned,
            published_at: published_day
                .map(|d| Utc.with_ymd_and_hms(2026, 7, d, 12, 0, 0).unwrap()),
            created_at: Utc.with_ymd_and_hms(2026, 6, created_day, 12, 0, 0).unwrap(),
        }
    }

    fn ids(news: &[NewsItem]) -> Vec<u128> {
        news.iter().map(|n| n.id.as_uuid().as_u128()).collect()
    }

    #[test]
    fn pinned_items_sort_first() {
        let mut news = vec![
            item(1, false, Some(28), 1),
            item(2, true, Some(2), 1),
            item(3, false, Some(27), 1),
        ];
        sort_for_display(&mut news);
        assert_eq!(ids(&news), vec![2, 1, 3]);
    }

    #[test]
    fn later_publish_date_sorts_first_within_pin_group() {
        let mut news = vec![
            item(1, false, Some(3), 1),
            item(2, false, Some(20), 1),
            item(3, true, Some(5), 1),
            item(4, true, Some(19), 1),
        ];
        sort_for_display(&mut news);
        assert_eq!(ids(&news), vec![4, 3, 2, 1]);
    }

    #[test]
    fn null_publish_dates_trail_their_pin_group() {
        let mut news = vec![
            item(1, false, None, 9),
            item(2, false, Some(1), 2),
            item(3, false, None, 12),
            item(4, true, None, 3),
            item(5, true, Some(1), 1),
        ];
        sort_for_display(&mut news);
        // Pinned dated, pinned undated, unpinned dated, unpinned undated
        // (undated ties broken by creation date descending).
        assert_eq!(ids(&news), vec![5, 4, 2, 3, 1]);
    }

    #[test]
    fn creation_date_breaks_publish_date_ties() {
        let mut news = vec![
            item(1, false, Some(10), 2),
            item(2, false, Some(10), 25),
        ];
        sort_for_display(&mut news);
        assert_eq!(ids(&news), vec![2, 1]);
    }

    #[test]
    fn patch_omits_untouched_columns_and_nulls_cleared_ones() {
        let patch = NewsPatch {
            title: Some("New title".to_owned()),
            image_url: Some(None),
            ..NewsPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["title"], "New title");
        assert!(json["image_url"].is_null());
        assert!(json.get("image_url").is_some());
        // Untouched columns are absent, not null.
        assert!(json.get("body").is_none());
        assert!(json.get("is_pinned").is_none());
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = NewsPatch::default();
        assert!(patch.is_empty());
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn feature_wire_values_round_trip() {
        for feature in NewsFeature::ALL {
            assert_eq!(NewsFeature::parse(feature.as_str()), Some(feature));
        }
        assert_eq!(NewsFeature::parse("unknown"), None);
    }
}
