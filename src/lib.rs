// Inkpost - Rust client for an Appwrite-backed blog platform

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod models;
pub mod query;
pub mod services;
pub mod types;

// Re-exports for convenience
pub use client::AppwriteClient;
pub use config::Config;
pub use query::Query;
pub use types::{AppError, AppResult};
