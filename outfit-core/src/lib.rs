//! Core library for the `outfit` forecast app.
//!
//! This crate defines:
//! - Settings and the persisted user state (name, saved locations)
//! - Abstraction over the geocoding and weather APIs, with an Open-Meteo client
//! - Weather-code classification and outfit recommendations
//! - The session that ties search, selection and weather display together
//!
//! It is used by `outfit-cli`, but can also be reused by other front ends.

pub mod classify;
pub mod config;
pub mod extras;
pub mod model;
pub mod outfit;
pub mod provider;
pub mod session;
pub mod store;

pub use classify::{Condition, classify};
pub use config::Settings;
pub use model::{Candidate, Location, SavedLocations, UserProfile, WeatherObservation};
pub use outfit::{OutfitBand, recommend};
pub use provider::{LocationSearch, OpenMeteo, ProviderError, WeatherSource};
pub use session::{Phase, Report, SearchOutcome, Session};
pub use store::ConfigStore;
