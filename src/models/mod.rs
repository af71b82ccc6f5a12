// src/models/mod.rs

pub mod problem;
pub mod user;
pub mod vote;
