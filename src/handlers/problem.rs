// src/handlers/problem.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::problem::{CreateProblemRequest, ProblemRecord, ProblemSummary},
    utils::{
        html::{MAX_LABEL_CHARS, clean_label},
        tile::{Hand, MAX_DORA, MAX_HAND_SIZE, MIN_HAND_SIZE, decode_tiles, encode_tiles},
    },
};

const RECORD_COLUMNS: &str = "id, round, wind, score, hand_tiles, dora_tiles, created_at";

/// Lists all problems in creation order, without tile payloads.
pub async fn list_problems(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let problems = sqlx::query_as::<_, ProblemSummary>(
        "SELECT id, round, wind, score, created_at FROM problems ORDER BY id ASC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(problems))
}

/// Retrieves a single problem by ID.
pub async fn get_problem(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let problem = sqlx::query_as::<_, ProblemRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM problems WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Problem not found".to_string()))?;

    Ok(Json(problem))
}

/// Picks one problem uniformly at random.
pub async fn random_problem(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let problem = sqlx::query_as::<_, ProblemRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM problems ORDER BY RANDOM() LIMIT 1"
    ))
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("No problems available".to_string()))?;

    Ok(Json(problem))
}

/// Checks the inner tile arrays and returns them in stored form:
/// the hand re-encoded in canonical order, the dora list as given.
fn canonical_tiles(payload: &CreateProblemRequest) -> Result<(String, String), AppError> {
    let hand = Hand::from_json_str(&payload.hand_tiles)
        .map_err(AppError::malformed_tiles("hand_tiles"))?;
    if !hand.has_legal_size() {
        return Err(AppError::BadRequest(format!(
            "Hand must contain {}-{} tiles, got {}",
            MIN_HAND_SIZE,
            MAX_HAND_SIZE,
            hand.len()
        )));
    }
    if let Some(tile) = hand.first_invalid() {
        return Err(AppError::BadRequest(format!(
            "Invalid tile id {} in hand",
            tile.id()
        )));
    }

    let dora = decode_tiles(&payload.dora_tiles)
        .map_err(AppError::malformed_tiles("dora_tiles"))?;
    if dora.len() > MAX_DORA {
        return Err(AppError::BadRequest(format!(
            "At most {} dora indicator is supported",
            MAX_DORA
        )));
    }
    if let Some(tile) = dora.iter().find(|t| !t.is_valid()) {
        return Err(AppError::BadRequest(format!(
            "Invalid tile id {} in dora",
            tile.id()
        )));
    }

    Ok((hand.sorted().to_json_string(), encode_tiles(&dora)))
}

/// Sanitized label, re-checked against the length limit after cleaning.
fn checked_label(field: &str, raw: &str) -> Result<String, AppError> {
    let label = clean_label(raw);
    let chars = label.chars().count();
    if chars == 0 || chars > MAX_LABEL_CHARS {
        return Err(AppError::BadRequest(format!(
            "{} label must be 1-{} characters of plain text",
            field, MAX_LABEL_CHARS
        )));
    }
    Ok(label)
}

/// Creates a new problem.
/// Admin only.
pub async fn create_problem(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateProblemRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (hand_tiles, dora_tiles) = canonical_tiles(&payload)?;
    let round = checked_label("Round", &payload.round)?;
    let wind = checked_label("Wind", &payload.wind)?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO problems (round, wind, score, hand_tiles, dora_tiles)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&round)
    .bind(&wind)
    .bind(payload.score)
    .bind(&hand_tiles)
    .bind(&dora_tiles)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create problem: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!(problem_id = id, hand = %hand_tiles, "problem created");

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Deletes a problem and, through the foreign key, its votes.
/// Admin only.
pub async fn delete_problem(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM problems WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete problem: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Problem not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
