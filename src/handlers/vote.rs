// src/handlers/vote.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::vote::CastVoteRequest,
    utils::jwt::Claims,
};

/// Records one rating of a problem.
///
/// The body names the voter; it has to be the logged-in user.
pub async fn cast_vote(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CastVoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.user_id != claims.user_id()? {
        return Err(AppError::Forbidden("Cannot vote on behalf of another user".to_string()));
    }

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM problems WHERE id = ?")
        .bind(payload.problem_id)
        .fetch_optional(&pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Problem not found".to_string()));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO votes (problem_id, user_id, point) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(payload.problem_id)
    .bind(payload.user_id)
    .bind(payload.point)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to cast vote: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::debug!(vote_id = id, problem_id = payload.problem_id, "vote cast");

    Ok((
        StatusCode::CREATED,
        Json(json!({"id": id, "message": "Vote cast"})),
    ))
}
