//! Steam game lookup service
//!
//! Catalog search, store details with achievement schemas, and per-user
//! achievement progress, each behind its own expiring cache. App ids are
//! checked against the catalog before any Steam Web API call is made.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod output;
pub mod server;
pub mod steam;
