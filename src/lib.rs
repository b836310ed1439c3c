pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use app::{app, AppState, Repositories};
pub use config::AppConfig;
pub use error::ApiError;
