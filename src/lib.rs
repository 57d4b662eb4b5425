//! pdf2md-web
//!
//! A small HTTP service that turns uploaded PDF documents into Markdown,
//! either as a JSON payload or as a downloadable `.md` file.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::{create_router, AppState};
