//! Position lookup and reverse geocoding behind small traits, so the
//! platform services can be swapped (the CLI uses fixed coordinates).

pub mod adapters;
pub mod resolver;

pub use adapters::{FixedPosition, NoGeocoder};
pub use resolver::{LocationResolver, describe};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("no location provider is enabled; turn on GPS or network location")]
    ProvidersDisabled,

    #[error("timed out after {0:?} waiting for a position; retry or check the GPS signal")]
    Timeout(Duration),

    #[error("location permission denied")]
    PermissionDenied,

    #[error("{provider} provider failed: {message}")]
    Provider {
        provider: ProviderKind,
        message: String,
    },

    #[error("geocoder failed: {0}")]
    Geocoder(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProviderKind {
    Network,
    Gps,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Network => f.write_str("network"),
            ProviderKind::Gps => f.write_str("gps"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `"<lat>, <lon>"`, used when no address is available.
    pub fn coordinate_text(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

/// Reverse-geocoding result. Only these parts make up the display text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub locality: Option<String>,
    pub sub_locality: Option<String>,
    pub thoroughfare: Option<String>,
    pub feature_name: Option<String>,
}

impl Address {
    /// Locality, sub-locality, thoroughfare and feature name, skipping
    /// empty parts, separated by one space.
    pub fn display_text(&self) -> String {
        [
            &self.locality,
            &self.sub_locality,
            &self.thoroughfare,
            &self.feature_name,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref().map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A source of positions (network cell/wifi, GPS, ...).
#[async_trait]
pub trait PositionProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn is_enabled(&self) -> bool;

    /// Cached reading, if the provider has one.
    fn last_known(&self) -> Option<Fix>;

    /// Wait for the next live reading. Dropping the future cancels the
    /// request and must deregister any listener.
    async fn next_fix(&self) -> Result<Fix, LocationError>;
}

pub trait Geocoder: Send + Sync {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<Address>, LocationError>;
}
