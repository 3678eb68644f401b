pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod telemetry;
pub mod users;

pub use errors::{AppError, AppResult};
pub use state::AppState;
