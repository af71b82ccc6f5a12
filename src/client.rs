// src/client.rs

//! Typed client for the evaluation API.
//!
//! Problems arrive double-encoded: `hand_tiles` and `dora_tiles` are JSON text
//! inside the JSON body. Every problem read here goes through both stages,
//! first into [`ProblemRecord`], then [`ProblemRecord::decode`] into [`Problem`].
//! A malformed inner payload is returned as [`ClientError::Decode`].
//!
//! The client holds no login state. Operations that need one take a
//! [`Session`] explicitly.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use url::Url;

use crate::{
    models::{
        problem::{CreateProblemRequest, Problem, ProblemRecord, ProblemSummary},
        user::{LoginRequest, LoginResponse, SignupRequest, User},
        vote::{CastVoteRequest, UserVoteStats},
    },
    utils::{
        stats::ResultSummary,
        tile::{Hand, MAX_DORA, MIN_HAND_SIZE, Tile, encode_tiles},
    },
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("malformed tile payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// A logged-in user. Returned by [`ApiClient::login`] and passed back in by
/// the caller for authenticated operations.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

/// Problem to create, with tiles as typed values.
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub round: String,
    pub wind: String,
    pub score: i64,
    pub hand: Hand,
    pub dora: Vec<Tile>,
}

impl NewProblem {
    /// The wire request: hand sorted into canonical order, both tile lists
    /// stringified.
    pub fn to_request(&self) -> Result<CreateProblemRequest, ClientError> {
        if self.hand.len() < MIN_HAND_SIZE {
            return Err(ClientError::InvalidInput(format!(
                "hand has {} tiles, need at least {}",
                self.hand.len(),
                MIN_HAND_SIZE
            )));
        }
        if self.dora.len() > MAX_DORA {
            return Err(ClientError::InvalidInput(format!(
                "at most {} dora indicator is supported",
                MAX_DORA
            )));
        }

        Ok(CreateProblemRequest {
            round: self.round.clone(),
            wind: self.wind.clone(),
            score: self.score,
            hand_tiles: self.hand.clone().sorted().to_json_string(),
            dora_tiles: encode_tiles(&self.dora),
        })
    }
}

#[derive(Deserialize)]
struct CreatedId {
    id: i64,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ResultParams {
    problem_id: i64,
    my_score: i64,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// `base_url` is the service root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    /// Turns a non-2xx response into `ClientError::Status`.
    async fn check(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("").to_string()
                } else {
                    body
                }
            });

        tracing::debug!(%status, %message, "request rejected");
        Err(ClientError::Status { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(path)?).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn get_json_auth<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(self.url(path)?)
            .bearer_auth(&session.token)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn delete_auth(&self, session: &Session, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(path)?)
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let body = SignupRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self.http.post(self.url("signup")?).json(&body).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self.http.post(self.url("login")?).json(&body).send().await?;
        let login: LoginResponse = Self::check(resp).await?.json().await?;

        Ok(Session {
            token: login.token,
            user: login.user,
        })
    }

    pub async fn list_problems(&self) -> Result<Vec<ProblemSummary>, ClientError> {
        self.get_json("problems").await
    }

    pub async fn get_problem(&self, id: i64) -> Result<Problem, ClientError> {
        let record: ProblemRecord = self.get_json(&format!("problems/{}", id)).await?;
        Ok(record.decode()?)
    }

    pub async fn random_problem(&self) -> Result<Problem, ClientError> {
        let record: ProblemRecord = self.get_json("problems/random").await?;
        Ok(record.decode()?)
    }

    /// Returns the new problem's id.
    pub async fn create_problem(
        &self,
        session: &Session,
        problem: &NewProblem,
    ) -> Result<i64, ClientError> {
        let body = problem.to_request()?;
        let resp = self
            .http
            .post(self.url("problems")?)
            .bearer_auth(&session.token)
            .json(&body)
            .send()
            .await?;
        let created: CreatedId = Self::check(resp).await?.json().await?;
        Ok(created.id)
    }

    pub async fn delete_problem(&self, session: &Session, id: i64) -> Result<(), ClientError> {
        self.delete_auth(session, &format!("problems/{}", id)).await
    }

    /// Votes as the session's user. Returns the vote id.
    pub async fn cast_vote(
        &self,
        session: &Session,
        problem_id: i64,
        point: i64,
    ) -> Result<i64, ClientError> {
        let body = CastVoteRequest {
            problem_id,
            user_id: session.user.id,
            point,
        };
        let resp = self
            .http
            .post(self.url("votes")?)
            .bearer_auth(&session.token)
            .json(&body)
            .send()
            .await?;
        let created: CreatedId = Self::check(resp).await?.json().await?;
        Ok(created.id)
    }

    pub async fn results(&self, problem_id: i64, my_score: i64) -> Result<ResultSummary, ClientError> {
        let resp = self
            .http
            .get(self.url("results")?)
            .query(&ResultParams {
                problem_id,
                my_score,
            })
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn list_users(&self, session: &Session) -> Result<Vec<User>, ClientError> {
        self.get_json_auth(session, "users").await
    }

    pub async fn user_votes(
        &self,
        session: &Session,
        user_id: i64,
    ) -> Result<UserVoteStats, ClientError> {
        self.get_json_auth(session, &format!("users/{}/votes", user_id))
            .await
    }

    pub async fn delete_user(&self, session: &Session, user_id: i64) -> Result<(), ClientError> {
        self.delete_auth(session, &format!("users/{}", user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api").unwrap();
        assert_eq!(
            client.url("problems/1").unwrap().as_str(),
            "http://localhost:8080/api/problems/1"
        );
    }

    #[test]
    fn new_problem_request_sorts_hand_only() {
        let problem = NewProblem {
            round: "東1".to_string(),
            wind: "南".to_string(),
            score: 25_000,
            hand: [33, 5, 2, 9, 0, 1, 3, 4, 6, 7, 8, 10, 11]
                .into_iter()
                .map(Tile::new)
                .collect(),
            dora: vec![Tile::new(28)],
        };

        let req = problem.to_request().unwrap();
        assert_eq!(req.hand_tiles, "[0,1,2,3,4,5,6,7,8,9,10,11,33]");
        assert_eq!(req.dora_tiles, "[28]");
    }

    #[test]
    fn short_hand_is_rejected_before_sending() {
        let problem = NewProblem {
            round: "東1".to_string(),
            wind: "東".to_string(),
            score: 25_000,
            hand: Hand::new(vec![Tile::new(0); 12]),
            dora: vec![],
        };

        assert!(matches!(
            problem.to_request(),
            Err(ClientError::InvalidInput(_))
        ));
    }
}
