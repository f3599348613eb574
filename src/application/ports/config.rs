//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for durable settings storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load settings from storage.
    ///
    /// # Returns
    /// The loaded config (all None if nothing has been saved yet)
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save settings to storage.
    ///
    /// # Arguments
    /// * `config` - The configuration to save
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the storage location.
    fn path(&self) -> PathBuf;

    /// Check if settings have been saved before.
    fn exists(&self) -> bool;

    /// Initialize storage with defaults.
    /// Fails if settings already exist.
    async fn init(&self) -> Result<(), ConfigError>;
}
