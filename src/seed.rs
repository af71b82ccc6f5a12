// src/seed.rs

use sqlx::SqlitePool;

use crate::{config::Config, error::AppError, models::user::ADMIN_ROLE, utils::hash::hash_password};

/// Hand and dora stored when the problems table is empty.
pub const SAMPLE_HAND: &str = "[0,1,2,9,10,11,18,19,20,27,27,31,31,32]";
pub const SAMPLE_DORA: &str = "[28]";

/// Creates the configured admin account unless the username is taken.
pub async fn seed_admin_user(pool: &SqlitePool, config: &Config) -> Result<(), AppError> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return Ok(());
    };

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    if existing.is_none() {
        tracing::info!("Seeding admin user: {}", username);
        let hashed_password = hash_password(password)?;

        sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(username)
            .bind(hashed_password)
            .bind(ADMIN_ROLE)
            .execute(pool)
            .await?;
        tracing::info!("Admin user created successfully.");
    }
    Ok(())
}

/// Inserts one sample problem so a fresh install has something to vote on.
pub async fn seed_sample_problem(pool: &SqlitePool) -> Result<(), AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM problems")
        .fetch_one(pool)
        .await?;

    if count == 0 {
        tracing::info!("Seeding sample problem");
        sqlx::query(
            "INSERT INTO problems (round, wind, score, hand_tiles, dora_tiles) VALUES (?, ?, ?, ?, ?)",
        )
        .bind("東1")
        .bind("東")
        .bind(25_000_i64)
        .bind(SAMPLE_HAND)
        .bind(SAMPLE_DORA)
        .execute(pool)
        .await?;
    }
    Ok(())
}
