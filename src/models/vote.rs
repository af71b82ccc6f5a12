// src/models/vote.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::stats::{MAX_POINT, MIN_POINT, mean};

/// Represents the 'votes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub problem_id: i64,
    pub user_id: i64,
    /// Desirability rating, 0-100.
    pub point: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for casting a vote.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CastVoteRequest {
    pub problem_id: i64,
    pub user_id: i64,
    #[validate(range(min = MIN_POINT, max = MAX_POINT, message = "Point must be between 0 and 100."))]
    pub point: i64,
}

/// Query string of `GET /results`.
#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub problem_id: i64,
    /// The caller's own rating; treated as 0 when absent.
    pub my_score: Option<i64>,
}

/// One user's voting history with simple aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserVoteStats {
    pub user_id: i64,
    pub total_votes: i64,
    pub average_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<i64>,
    pub votes: Vec<UserVote>,
}

/// A vote as listed in a user's history.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct UserVote {
    pub id: i64,
    pub problem_id: i64,
    pub point: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserVoteStats {
    pub fn from_votes(user_id: i64, votes: Vec<UserVote>) -> Self {
        let points: Vec<i64> = votes.iter().map(|v| v.point).collect();

        Self {
            user_id,
            total_votes: points.len() as i64,
            average_score: mean(&points),
            min_score: points.iter().copied().min(),
            max_score: points.iter().copied().max(),
            votes,
        }
    }
}
