//! HTTP client for the Supabase backend.

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use spotlyt_core::{
    CreatorRow, Email, JobRow, NewsDraft, NewsId, NewsItem, NewsPatch, Principal,
    TransactionAmount, TransactionRow,
};

use super::types::{AdminProfileRole, GoTrueError, GoTrueUser, PostgrestError};
use crate::backend::{Backend, BackendError, CreatorFilter, TransactionSample};
use crate::config::SupabaseConfig;

/// Client for the backend's GoTrue and PostgREST APIs.
#[derive(Clone)]
pub struct SupabaseClient {
    /// HTTP client.
    http: Client,
    /// Service base URL, no trailing slash.
    base_url: String,
    /// Public API key sent as `apikey` on every request.
    anon_key: SecretString,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Create a new client from backend configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.url.as_str().trim_end_matches('/').to_owned(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{endpoint}", self.base_url)
    }

    /// Attach the `apikey` header plus a bearer token. Table access uses
    /// the public key itself; GoTrue introspection uses the user's token.
    fn authed(&self, builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        let key = self.anon_key.expose_secret();
        builder
            .header("apikey", key)
            .bearer_auth(bearer.unwrap_or(key))
    }

    /// Exact count of rows matching `filters`, without fetching any.
    async fn head_count(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<u64, BackendError> {
        let request = self
            .authed(self.http.head(self.rest_url(table)), None)
            .query(&[("select", "*")])
            .query(filters)
            .header("Prefer", "count=exact");

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let response = check_rest_status(response).await?;

        let header = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| BackendError::Response("missing content-range header".to_owned()))?;

        parse_content_range_total(header).ok_or_else(|| {
            BackendError::Response(format!("unparseable content-range header: {header}"))
        })
    }
}

/// Total row count from a PostgREST `Content-Range` header.
///
/// The header looks like `0-99/1234` or `*/0`; the figure after the slash
/// is the exact count requested via `Prefer: count=exact`.
fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.parse().ok()
}

/// Turn a non-success PostgREST response into a [`BackendError::Api`].
async fn check_rest_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<PostgrestError>()
        .await
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_owned()
        });
    error!(status = status.as_u16(), %message, "backend table request failed");
    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Turn a non-success GoTrue response into a [`BackendError::Api`].
async fn check_auth_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<GoTrueError>()
        .await
        .ok()
        .and_then(GoTrueError::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("authentication request rejected")
                .to_owned()
        });
    error!(status = status.as_u16(), %message, "backend auth request failed");
    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait::async_trait]
impl Backend for SupabaseClient {
    #[instrument(skip(self), fields(email = %email))]
    async fn send_magic_link(&self, email: &Email, redirect_to: &str) -> Result<(), BackendError> {
        let response = self
            .authed(self.http.post(self.auth_url("otp")), None)
            .query(&[("redirect_to", redirect_to)])
            .json(&serde_json::json!({
                "email": email.as_str(),
                "create_user": true,
            }))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_auth_status(response).await?;
        debug!("magic link requested");
        Ok(())
    }

    #[instrument(skip(self, access_token))]
    async fn get_principal(&self, access_token: &str) -> Result<Principal, BackendError> {
        let response = self
            .authed(self.http.get(self.auth_url("user")), Some(access_token))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let user: GoTrueUser = check_auth_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Response(e.to_string()))?;
        Ok(user.into())
    }

    #[instrument(skip(self, access_token))]
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self
            .authed(self.http.post(self.auth_url("logout")), Some(access_token))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_auth_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn admin_profile_role(&self, principal_id: Uuid) -> Result<Option<String>, BackendError> {
        let id_filter = format!("eq.{principal_id}");
        let response = self
            .authed(self.http.get(self.rest_url("admin_profiles")), None)
            .query(&[("select", "role"), ("id", id_filter.as_str())])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let rows: Vec<AdminProfileRole> = check_rest_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Response(e.to_string()))?;
        Ok(rows.into_iter().next().and_then(|row| row.role))
    }

    #[instrument(skip(self))]
    async fn count_users(&self, filter: CreatorFilter) -> Result<u64, BackendError> {
        let filters: &[(&str, &str)] = match filter {
            CreatorFilter::All => &[],
            CreatorFilter::Influencers => &[("is_influencer", "eq.true")],
            CreatorFilter::Talent => &[("is_talent", "eq.true")],
        };
        self.head_count("users", filters).await
    }

    #[instrument(skip(self))]
    async fn count_active_jobs(&self) -> Result<u64, BackendError> {
        self.head_count("marketing_jobs", &[("status", "eq.active")])
            .await
    }

    #[instrument(skip(self))]
    async fn count_pending_applications(&self) -> Result<u64, BackendError> {
        self.head_count("influencer_applications", &[("status", "eq.pending")])
            .await
    }

    #[instrument(skip(self))]
    async fn recent_transaction_amounts(
        &self,
        limit: u32,
    ) -> Result<TransactionSample, BackendError> {
        let response = self
            .authed(self.http.get(self.rest_url("wallet_transactions")), None)
            .query(&[
                ("select", "amount,currency"),
                ("order", "created_at.desc"),
                ("limit", limit.to_string().as_str()),
            ])
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let response = check_rest_status(response).await?;
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| BackendError::Response("missing content-range header".to_owned()))?;
        let rows: Vec<TransactionAmount> = response
            .json()
            .await
            .map_err(|e| BackendError::Response(e.to_string()))?;

        Ok(TransactionSample { total, rows })
    }

    #[instrument(skip(self))]
    async fn recent_creators(&self, limit: u32) -> Result<Vec<CreatorRow>, BackendError> {
        let response = self
            .authed(self.http.get(self.rest_url("users")), None)
            .query(&[
                (
                    "select",
                    "id,full_name,email,creator_type,is_influencer,is_talent,talent_skill,\
                     total_followers,daily_rate,created_at",
                ),
                ("order", "created_at.desc"),
                ("limit", limit.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_rest_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Response(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn recent_jobs(&self, limit: u32) -> Result<Vec<JobRow>, BackendError> {
        let response = self
            .authed(self.http.get(self.rest_url("marketing_jobs")), None)
            .query(&[
                ("select", "id,title,status,created_at,offer,currency"),
                ("order", "created_at.desc"),
                ("limit", limit.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_rest_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Response(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn recent_transactions(&self, limit: u32) -> Result<Vec<TransactionRow>, BackendError> {
        let response = self
            .authed(self.http.get(self.rest_url("wallet_transactions")), None)
            .query(&[
                (
                    "select",
                    "id,user_id,amount,currency,status,created_at,description",
                ),
                ("order", "created_at.desc"),
                ("limit", limit.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_rest_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Response(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn list_news(&self) -> Result<Vec<NewsItem>, BackendError> {
        let response = self
            .authed(self.http.get(self.rest_url("spotlyt_news")), None)
            .query(&[
                ("select", "*"),
                (
                    "order",
                    "is_pinned.desc,published_at.desc.nullslast,created_at.desc",
                ),
            ])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_rest_status(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Response(e.to_string()))
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn insert_news(&self, draft: NewsDraft) -> Result<(), BackendError> {
        let response = self
            .authed(self.http.post(self.rest_url("spotlyt_news")), None)
            .header("Prefer", "return=minimal")
            .json(&draft)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_rest_status(response).await?;
        debug!("news item inserted");
        Ok(())
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update_news(&self, id: NewsId, patch: NewsPatch) -> Result<(), BackendError> {
        let id_filter = format!("eq.{id}");
        let response = self
            .authed(self.http.patch(self.rest_url("spotlyt_news")), None)
            .query(&[("id", id_filter.as_str())])
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_rest_status(response).await?;
        debug!("news item updated");
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_news(&self, id: NewsId) -> Result<(), BackendError> {
        let id_filter = format!("eq.{id}");
        let response = self
            .authed(self.http.delete(self.rest_url("spotlyt_news")), None)
            .query(&[("id", id_filter.as_str())])
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        check_rest_status(response).await?;
        debug!("news item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_range_with_window() {
        assert_eq!(parse_content_range_total("0-99/1234"), Some(1234));
    }

    #[test]
    fn content_range_without_window() {
        assert_eq!(parse_content_range_total("*/0"), Some(0));
    }

    #[test]
    fn content_range_garbage_is_none() {
        assert_eq!(parse_content_range_total("0-99"), None);
        assert_eq!(parse_content_range_total("0-99/many"), None);
        assert_eq!(parse_content_range_total(""), None);
    }
}
