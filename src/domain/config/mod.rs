//! Configuration domain module

mod app_config;
mod timeout;

pub use app_config::AppConfig;
pub use timeout::{RequestTimeout, DEFAULT_TIMEOUT_SECS};
