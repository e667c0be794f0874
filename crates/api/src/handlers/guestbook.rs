//! Handlers for the public `/guestbook` form.
//!
//! Submissions validate against the configured field set before anything
//! touches the database. A saved message triggers a best-effort mail
//! notification; mail failures never fail the submission.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use sitecraft_core::error::CoreError;
use sitecraft_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sitecraft_core::plugin::guestbook::{validate_submission, FieldValue};
use sitecraft_core::plugin::{GuestbookConfig, PluginName, SendmailConfig};
use sitecraft_core::types::DbId;
use sitecraft_db::repositories::GuestbookRepo;

use crate::error::{AppError, AppResult};
use crate::plugins::{load_config, mailer::Mailer};
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/guestbook
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Value>>> {
    let config: GuestbookConfig = load_config(&state.pool, PluginName::Guestbook).await?;
    let fields = config.all_fields();
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let messages = GuestbookRepo::list(&state.pool, &fields, limit, offset).await?;
    Ok(Json(messages))
}

/// POST /api/v1/guestbook
///
/// Validates the submission against the configured field set, stores it,
/// and notifies the configured mail recipient in the background.
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let config: GuestbookConfig = load_config(&state.pool, PluginName::Guestbook).await?;
    let fields = config.all_fields();
    let validated = validate_submission(&fields, &body)?;
    let id = GuestbookRepo::insert(&state.pool, &validated).await?;

    let summary: String = validated
        .iter()
        .map(|field| {
            let value = match &field.value {
                FieldValue::Text(s) => s.clone(),
                FieldValue::Integer(n) => n.to_string(),
            };
            format!("{}: {value}\n", field.field_name)
        })
        .collect();
    notify_by_mail(&state, id, summary);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "return_message": config.return_message,
        })),
    ))
}

/// DELETE /api/v1/guestbook/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GuestbookRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Guestbook message",
            id,
        }))
    }
}

/// Send the new-message notification in the background, skipping
/// silently when the sendmail plugin is not configured.
fn notify_by_mail(state: &AppState, message_id: DbId, summary: String) {
    let pool = state.pool.clone();
    tokio::spawn(async move {
        let config: SendmailConfig = match load_config(&pool, PluginName::Sendmail).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping guestbook mail notification");
                return;
            }
        };
        if config.ensure_ready().is_err() {
            return;
        }
        let subject = format!("New guestbook message #{message_id}");
        if let Err(e) = Mailer::new(config).send(&subject, &summary).await {
            tracing::warn!(message_id, error = %e, "Guestbook mail notification failed");
        }
    });
}
