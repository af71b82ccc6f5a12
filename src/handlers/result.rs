// src/handlers/result.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::vote::ResultQuery, utils::stats::summarize};

/// Aggregates every vote on a problem relative to the caller's score.
///
/// Recomputed on each request; nothing is cached or stored.
pub async fn get_results(
    State(pool): State<SqlitePool>,
    Query(params): Query<ResultQuery>,
) -> Result<impl IntoResponse, AppError> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM problems WHERE id = ?")
        .bind(params.problem_id)
        .fetch_optional(&pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Problem not found".to_string()));
    }

    let points: Vec<i64> =
        sqlx::query_scalar("SELECT point FROM votes WHERE problem_id = ? ORDER BY id ASC")
            .bind(params.problem_id)
            .fetch_all(&pool)
            .await?;

    Ok(Json(summarize(&points, params.my_score.unwrap_or(0))))
}
