//! Infrastructure Layer
//!
//! Contains implementations for external services:
//! - Database connection pool and migrations (PostgreSQL)
//! - Database repositories

pub mod database;
pub mod repositories;
