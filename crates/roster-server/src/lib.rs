//! Roster Server - Axum service for the seller roster.

pub mod config;
pub mod routes;
pub mod state;

pub use config::Config;
pub use state::AppState;
