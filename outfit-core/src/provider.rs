use crate::model::{Candidate, WeatherObservation};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

pub use openmeteo::OpenMeteo;

/// Failure talking to a remote API.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Free-text place lookup.
#[async_trait]
pub trait LocationSearch: Send + Sync + Debug {
    /// An empty list means the service answered but knew no such place.
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError>;
}

/// Current conditions at a coordinate.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherObservation, ProviderError>;
}
