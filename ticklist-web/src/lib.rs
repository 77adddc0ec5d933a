//! # TickList Web Server Library
//!
//! This library provides the core functionality for the TickList web server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: Route handlers
//! - `views`: HTML page rendering

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod views;
