//! Core library for the `metweather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The backend registry and the MET Norway (`yr`) backend
//! - Location resolution, condition mapping and day grouping
//! - Shared domain models (conditions, days, weather data)
//!
//! Front ends pick a backend by id and render the returned [`WeatherData`].

pub mod aggregate;
pub mod astro;
pub mod backend;
pub mod config;
pub mod error;
pub mod geocode;
pub mod location;
pub mod model;

pub use backend::{BackendId, WeatherBackend, backend_from_config, default_backend_from_config};
pub use config::{BackendConfig, Config};
pub use error::BackendError;
pub use model::{Astro, Condition, Day, WeatherCode, WeatherData};
