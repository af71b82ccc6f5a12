// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod health;
pub mod problem;
pub mod result;
pub mod vote;

/// True when a sqlx error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
