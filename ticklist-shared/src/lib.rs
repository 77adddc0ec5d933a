//! # TickList Shared Library
//!
//! This crate contains the domain logic shared by the TickList web server
//! and its tests: database models, the credential store, session token
//! handling, and connection pool management.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Passwords, credentials, sessions, and the resolver middleware
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TickList shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
