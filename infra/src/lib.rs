//! # Clavis Infrastructure
//!
//! Infrastructure layer for the Clavis backend: concrete implementations of
//! the core repository interfaces backed by MySQL via SQLx.

pub mod database;

pub use database::connection::DatabasePool;
pub use database::mysql::MySqlUserRepository;
