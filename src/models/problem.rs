// src/models/problem.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::tile::{Hand, Tile, decode_tiles};

/// Represents the 'problems' table, and the wire shape of a single problem.
///
/// `hand_tiles` and `dora_tiles` hold JSON text (e.g. `"[0,1,2]"`), so a
/// response body is JSON inside JSON. Call [`ProblemRecord::decode`] for the
/// second stage.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub id: i64,

    /// Round label, e.g. "東1".
    pub round: String,

    /// Seat wind label, e.g. "南".
    pub wind: String,

    /// Points held at the start of the hand.
    pub score: i64,

    pub hand_tiles: String,

    pub dora_tiles: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProblemRecord {
    /// Parses the inner tile arrays.
    ///
    /// Tile ids are not range-checked; unknown ids render as the tile back.
    pub fn decode(self) -> Result<Problem, serde_json::Error> {
        let hand = Hand::from_json_str(&self.hand_tiles)?;
        let dora = decode_tiles(&self.dora_tiles)?;

        Ok(Problem {
            id: self.id,
            round: self.round,
            wind: self.wind,
            score: self.score,
            hand,
            dora,
            created_at: self.created_at,
        })
    }
}

/// A problem with its tile payload decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub round: String,
    pub wind: String,
    pub score: i64,
    pub hand: Hand,
    /// Dora indicators; at most one in this version.
    pub dora: Vec<Tile>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// List view row, without the tile payload.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub id: i64,
    pub round: String,
    pub wind: String,
    pub score: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a problem. Tile fields are JSON text, as on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = 20, message = "Round label must be 1-20 characters."))]
    pub round: String,
    #[validate(length(min = 1, max = 20, message = "Wind label must be 1-20 characters."))]
    pub wind: String,
    #[validate(range(min = 0, max = 1_000_000))]
    pub score: i64,
    #[validate(length(min = 2, max = 200))]
    pub hand_tiles: String,
    #[validate(length(min = 2, max = 20))]
    pub dora_tiles: String,
}
