pub mod api;
pub mod bbb;
pub mod config;
pub mod error;
pub mod meetings;
pub mod models;
pub mod state;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
