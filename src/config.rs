use anyhow::Result;
use serde::Deserialize;

use crate::client::EndpointResolver;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub api: ApiConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub environment: Environment,
}

/// Deployment environment, selects which API base URL requests go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Fixed local address used in development
    pub dev_base_url: String,
    /// Externally configured address used in production
    pub prod_base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    /// Sample rate captured audio is normalized to before upload
    pub sample_rate: u32,
    /// Size of each emitted fragment when a device chunks a finished blob
    pub fragment_bytes: usize,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl EndpointResolver for Config {
    fn base_url(&self) -> String {
        match self.service.environment {
            Environment::Development => self.api.dev_base_url.clone(),
            Environment::Production => self.api.prod_base_url.clone(),
        }
    }
}
