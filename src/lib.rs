pub mod catalog;
pub mod config;
pub mod error;
pub mod listings;
pub mod models;
pub mod server;

pub use config::Config;
pub use error::AppError;
