//! Foodtrack - terminal client for the Food Tracker API
//!
//! This is the library interface for foodtrack, exposing the session
//! store, the section guard and the gateway client for programmatic use.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;

pub use api::ApiClient;
pub use config::Config;
pub use error::Error;
