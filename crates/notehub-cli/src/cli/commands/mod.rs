//! CLI command handlers.

pub mod auth;
pub mod browse;
pub mod config;
