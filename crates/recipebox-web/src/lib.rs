//! Recipebox web front end
//!
//! A thin axum layer over the engine commands: an HTML index with a
//! create/update form, a JSON API, and static file serving.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::router;
pub use state::AppState;
