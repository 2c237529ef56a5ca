#![allow(dead_code)]

//! Shared test harness: an in-memory backend double plus helpers for
//! driving the real router.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::{DateTime, TimeZone, Utc};
use tower::util::ServiceExt;
use uuid::Uuid;

use spotlyt_admin::backend::{Backend, BackendError, CreatorFilter, TransactionSample};
use spotlyt_admin::config::AdminConfig;
use spotlyt_admin::routes;
use spotlyt_admin::state::AppState;
use spotlyt_core::{
    CreatorRow, Email, JobRow, NewsDraft, NewsFeature, NewsId, NewsItem, NewsPatch, Principal,
    TransactionAmount, TransactionRow, UserId,
};

/// Access token that resolves to a principal with an `admin` role claim.
pub const TOKEN_CLAIM_ADMIN: &str = "tok-claim-admin";
/// Access token whose principal has no claim but an `admin_profiles` row.
pub const TOKEN_PROFILE_ADMIN: &str = "tok-profile-admin";
/// Access token whose principal is no admin at all.
pub const TOKEN_PLAIN_USER: &str = "tok-plain-user";
/// Access token with a non-privileged claim but a privileged profile row.
pub const TOKEN_ODD_CLAIM: &str = "tok-odd-claim";

/// Everything the fake backend serves, mutable per test.
#[derive(Default)]
pub struct FakeData {
    /// token -> principal
    pub principals: HashMap<String, Principal>,
    /// principal id -> admin_profiles role
    pub profile_roles: HashMap<Uuid, String>,
    pub total_users: u64,
    pub total_influencers: u64,
    pub total_talent: u64,
    pub active_jobs: u64,
    pub pending_applications: u64,
    pub transaction_total: u64,
    pub transaction_sample: Vec<TransactionAmount>,
    pub creators: Vec<CreatorRow>,
    pub jobs: Vec<JobRow>,
    pub transactions: Vec<TransactionRow>,
    pub news: Vec<NewsItem>,
}

/// In-memory [`Backend`] double with per-operation call counters and
/// injectable failures.
pub struct FakeBackend {
    pub data: Mutex<FakeData>,
    calls: Mutex<HashMap<&'static str, u64>>,
    fail: Mutex<HashMap<&'static str, String>>,
}

impl FakeBackend {
    pub fn new(data: FakeData) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(data),
            calls: Mutex::new(HashMap::new()),
            fail: Mutex::new(HashMap::new()),
        })
    }

    /// Make every future call to `op` fail with `message`.
    pub fn fail_with(&self, op: &'static str, message: &str) {
        self.fail
            .lock()
            .expect("fail lock")
            .insert(op, message.to_owned());
    }

    /// Stop failing `op`.
    pub fn heal(&self, op: &'static str) {
        self.fail.lock().expect("fail lock").remove(op);
    }

    /// How many times `op` has been called.
    pub fn calls(&self, op: &'static str) -> u64 {
        *self.calls.lock().expect("calls lock").get(op).unwrap_or(&0)
    }

    /// Total calls across every operation a dashboard load issues.
    pub fn load_calls(&self) -> u64 {
        [
            "count_users",
            "count_active_jobs",
            "count_pending_applications",
            "recent_transaction_amounts",
            "recent_creators",
            "recent_jobs",
            "recent_transactions",
            "list_news",
        ]
        .iter()
        .map(|op| self.calls(op))
        .sum()
    }

    fn hit(&self, op: &'static str) -> Result<(), BackendError> {
        *self.calls.lock().expect("calls lock").entry(op).or_insert(0) += 1;
        if let Some(message) = self.fail.lock().expect("fail lock").get(op) {
            return Err(BackendError::Api {
                status: 500,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn send_magic_link(&self, _email: &Email, _redirect_to: &str) -> Result<(), BackendError> {
        self.hit("send_magic_link")
    }

    async fn get_principal(&self, access_token: &str) -> Result<Principal, BackendError> {
        self.hit("get_principal")?;
        self.data
            .lock()
            .expect("data lock")
            .principals
            .get(access_token)
            .cloned()
            .ok_or(BackendError::Api {
                status: 401,
                message: "invalid JWT".to_owned(),
            })
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), BackendError> {
        self.hit("sign_out")
    }

    async fn admin_profile_role(&self, principal_id: Uuid) -> Result<Option<String>, BackendError> {
        self.hit("admin_profile_role")?;
        Ok(self
            .data
            .lock()
            .expect("data lock")
            .profile_roles
            .get(&principal_id)
            .cloned())
    }

    async fn count_users(&self, filter: CreatorFilter) -> Result<u64, BackendError> {
        self.hit("count_users")?;
        let data = self.data.lock().expect("data lock");
        Ok(match filter {
            CreatorFilter::All => data.total_users,
            CreatorFilter::Influencers => data.total_influencers,
            CreatorFilter::Talent => data.total_talent,
        })
    }

    async fn count_active_jobs(&self) -> Result<u64, BackendError> {
        self.hit("count_active_jobs")?;
        Ok(self.data.lock().expect("data lock").active_jobs)
    }

    async fn count_pending_applications(&self) -> Result<u64, BackendError> {
        self.hit("count_pending_applications")?;
        Ok(self.data.lock().expect("data lock").pending_applications)
    }

    async fn recent_transaction_amounts(
        &self,
        limit: u32,
    ) -> Result<TransactionSample, BackendError> {
        self.hit("recent_transaction_amounts")?;
        let data = self.data.lock().expect("data lock");
        let rows = data
            .transaction_sample
            .iter()
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(TransactionSample {
            total: data.transaction_total,
            rows,
        })
    }

    async fn recent_creators(&self, limit: u32) -> Result<Vec<CreatorRow>, BackendError> {
        self.hit("recent_creators")?;
        let data = self.data.lock().expect("data lock");
        Ok(data.creators.iter().take(limit as usize).cloned().collect())
    }

    async fn recent_jobs(&self, limit: u32) -> Result<Vec<JobRow>, BackendError> {
        self.hit("recent_jobs")?;
        let data = self.data.lock().expect("data lock");
        Ok(data.jobs.iter().take(limit as usize).cloned().collect())
    }

    async fn recent_transactions(&self, limit: u32) -> Result<Vec<TransactionRow>, BackendError> {
        self.hit("recent_transactions")?;
        let data = self.data.lock().expect("data lock");
        Ok(data
            .transactions
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_news(&self) -> Result<Vec<NewsItem>, BackendError> {
        self.hit("list_news")?;
        Ok(self.data.lock().expect("data lock").news.clone())
    }

    async fn insert_news(&self, draft: NewsDraft) -> Result<(), BackendError> {
        self.hit("insert_news")?;
        let mut data = self.data.lock().expect("data lock");
        let now = Utc::now();
        data.news.push(NewsItem {
            id: NewsId::new(Uuid::new_v4()),
            title: draft.title,
            body: draft.body,
            feature: draft.feature,
            image_url: draft.image_url,
            cta_label: draft.cta_label,
            cta_url: draft.cta_url,
            is_published: draft.is_published,
            is_pinned: draft.is_pinned,
            published_at: draft.is_published.then_some(now),
            created_at: now,
        });
        Ok(())
    }

    async fn update_news(&self, id: NewsId, patch: NewsPatch) -> Result<(), BackendError> {
        self.hit("update_news")?;
        let mut data = self.data.lock().expect("data lock");
        let Some(item) = data.news.iter_mut().find(|item| item.id == id) else {
            return Err(BackendError::Api {
                status: 404,
                message: "no such news item".to_owned(),
            });
        };
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(body) = patch.body {
            item.body = body;
        }
        if let Some(feature) = patch.feature {
            item.feature = feature;
        }
        if let Some(image_url) = patch.image_url {
            item.image_url = image_url;
        }
        if let Some(cta_label) = patch.cta_label {
            item.cta_label = cta_label;
        }
        if let Some(cta_url) = patch.cta_url {
            item.cta_url = cta_url;
        }
        if let Some(is_published) = patch.is_published {
            item.is_published = is_published;
        }
        if let Some(is_pinned) = patch.is_pinned {
            item.is_pinned = is_pinned;
        }
        Ok(())
    }

    async fn delete_news(&self, id: NewsId) -> Result<(), BackendError> {
        self.hit("delete_news")?;
        self.data
            .lock()
            .expect("data lock")
            .news
            .retain(|item| item.id != id);
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, day, hour, 0, 0).single().expect("valid date")
}

/// Deterministic UUID for fixtures.
pub fn uid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Data with the four standard principals wired up.
pub fn base_data() -> FakeData {
    let mut data = FakeData::default();

    data.principals.insert(
        TOKEN_CLAIM_ADMIN.to_owned(),
        Principal {
            id: uid(1),
            email: Some("claims@spotlyt.com".to_owned()),
            role_claim: Some("admin".to_owned()),
        },
    );

    data.principals.insert(
        TOKEN_PROFILE_ADMIN.to_owned(),
        Principal {
            id: uid(2),
            email: Some("profile@spotlyt.com".to_owned()),
            role_claim: None,
        },
    );
    data.profile_roles.insert(uid(2), "super_admin".to_owned());

    data.principals.insert(
        TOKEN_PLAIN_USER.to_owned(),
        Principal {
            id: uid(3),
            email: Some("creator@spotlyt.com".to_owned()),
            role_claim: None,
        },
    );

    data.principals.insert(
        TOKEN_ODD_CLAIM.to_owned(),
        Principal {
            id: uid(4),
            email: Some("odd@spotlyt.com".to_owned()),
            role_claim: Some("moderator".to_owned()),
        },
    );
    data.profile_roles.insert(uid(4), "admin".to_owned());

    data
}

pub fn news_item(n: u128, title: &str, pinned: bool, published: Option<DateTime<Utc>>) -> NewsItem {
    NewsItem {
        id: NewsId::new(uid(n)),
        title: title.to_owned(),
        body: format!("{title} body"),
        feature: NewsFeature::General,
        image_url: None,
        cta_label: None,
        cta_url: None,
        is_published: published.is_some(),
        is_pinned: pinned,
        published_at: published,
        created_at: at(1, 0),
    }
}

pub fn creator_row(n: u128, name: &str) -> CreatorRow {
    CreatorRow {
        id: UserId::new(uid(n)),
        full_name: Some(name.to_owned()),
        email: Some(format!("{name}@example.com")),
        creator_type: None,
        is_influencer: true,
        is_talent: false,
        talent_skill: None,
        total_followers: Some(1_000),
        daily_rate: None,
        created_at: at(2, 0),
    }
}

// =============================================================================
// Router helpers
// =============================================================================

pub fn test_config() -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        base_url: "http://127.0.0.1:3002".to_owned(),
        supabase: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// Build the real application router over a fake backend.
pub fn test_app(backend: Arc<FakeBackend>) -> Router {
    let state = AppState::new(test_config(), backend);
    routes::app(state)
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    form: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::from(form.to_owned())).expect("request"))
        .await
        .expect("response")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_owned()
}

/// Complete the sign-in flow for a token and return the session cookie.
pub async fn sign_in(app: &Router, token: &str) -> String {
    let response = post_form(app, "/auth/session", &format!("access_token={token}"), None).await;
    assert_eq!(
        location(&response),
        "/",
        "sign-in should land on the dashboard"
    );
    session_cookie(&response)
}
