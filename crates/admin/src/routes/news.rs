//! News mutation route handlers.
//!
//! All three handlers redirect back to the dashboard's news section;
//! outcomes travel as `news_notice`/`news_error` query parameters so they
//! render inline next to the forms. Create and update reload the whole
//! dashboard on success; delete only filters the local list.

use axum::{
    Form, Router,
    extract::{Path, State},
    response::Redirect,
    routing::post,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use spotlyt_core::{NewsDraft, NewsFeature, NewsId, NewsPatch};

use crate::{error::AppError, middleware::RequireAdmin, state::AppState};

/// Build the news router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", post(create))
        .route("/news/{id}", post(update))
        .route("/news/{id}/delete", post(delete))
}

fn none_if_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn news_error(message: &str) -> Redirect {
    let location = format!("/?news_error={}#news", urlencoding::encode(message));
    Redirect::to(&location)
}

fn news_notice(message: &str) -> Redirect {
    let location = format!("/?news_notice={}#news", urlencoding::encode(message));
    Redirect::to(&location)
}

fn parse_feature(value: &str) -> Result<NewsFeature, AppError> {
    NewsFeature::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("unknown feature: {value}")))
}

#[derive(Debug, Deserialize)]
pub struct CreateNewsForm {
    title: String,
    body: String,
    feature: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    cta_label: String,
    #[serde(default)]
    cta_url: String,
    /// Checkbox: present when checked.
    #[serde(default)]
    is_pinned: Option<String>,
}

/// Create an announcement. Always inserted as published; pinning is
/// opt-in.
///
/// POST /news
#[instrument(skip(_admin, state, form))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<CreateNewsForm>,
) -> Result<Redirect, AppError> {
    let feature = parse_feature(&form.feature)?;

    let title = form.title.trim();
    let body = form.body.trim();
    // The form marks both required; this covers whitespace-only input.
    if title.is_empty() || body.is_empty() {
        return Ok(news_error("Headline and body are required."));
    }

    let draft = NewsDraft {
        title: title.to_owned(),
        body: body.to_owned(),
        feature,
        image_url: none_if_empty(form.image_url),
        cta_label: none_if_empty(form.cta_label),
        cta_url: none_if_empty(form.cta_url),
        is_published: true,
        is_pinned: form.is_pinned.is_some(),
    };

    match state.dashboard().create_news(draft).await {
        Ok(()) => Ok(news_notice("News item published!")),
        Err(e) => {
            tracing::warn!(error = %e, "news create failed");
            Ok(news_error(&e.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNewsForm {
    title: String,
    body: String,
    feature: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    cta_label: String,
    #[serde(default)]
    cta_url: String,
    #[serde(default)]
    is_published: Option<String>,
    #[serde(default)]
    is_pinned: Option<String>,
}

/// Update an announcement.
///
/// The edit form submits every field, so the patch sets every column;
/// blank optional fields clear their columns explicitly.
///
/// POST /news/{id}
#[instrument(skip(_admin, state, form), fields(id = %id))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<UpdateNewsForm>,
) -> Result<Redirect, AppError> {
    let feature = parse_feature(&form.feature)?;

    let patch = NewsPatch {
        title: Some(form.title),
        body: Some(form.body),
        feature: Some(feature),
        image_url: Some(none_if_empty(form.image_url)),
        cta_label: Some(none_if_empty(form.cta_label)),
        cta_url: Some(none_if_empty(form.cta_url)),
        is_published: Some(form.is_published.is_some()),
        is_pinned: Some(form.is_pinned.is_some()),
    };

    match state.dashboard().update_news(NewsId::new(id), patch).await {
        Ok(()) => Ok(news_notice("News item updated.")),
        Err(e) => {
            tracing::warn!(error = %e, "news update failed");
            Ok(news_error(&e.to_string()))
        }
    }
}

/// Delete an announcement. The list updates locally on success; no reload
/// is issued.
///
/// POST /news/{id}/delete
#[instrument(skip(_admin, state), fields(id = %id))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Redirect {
    match state.dashboard().delete_news(NewsId::new(id)).await {
        Ok(()) => Redirect::to("/#news"),
        Err(e) => {
            tracing::warn!(error = %e, "news delete failed");
            news_error(&e.to_string())
        }
    }
}
