pub mod chores;
pub mod clock;
pub mod config;
pub mod error;
pub mod fetch;
pub mod life;
pub mod news;
pub mod store;
pub mod weather;

pub use config::AppConfig;
pub use error::{Error, Result};
