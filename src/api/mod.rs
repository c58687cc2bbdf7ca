//! Geocoding provider clients.
//!
//! Each client turns an address string into a [`Coordinate`]. Failures are
//! reported through [`GeocodeError`] by [`Geocoder::lookup`]; callers that only
//! care about presence use [`Geocoder::geocode`], which logs and swallows them.

pub mod gsi;
pub mod nominatim;
pub mod response;

pub use gsi::GsiClient;
pub use nominatim::NominatimClient;
pub use response::RawResponse;

use crate::domain::Coordinate;
use reqwest::blocking::RequestBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no match")]
    NoMatch,
    #[error("first result has no coordinates")]
    MissingCoordinates,
    #[error("invalid coordinate value {0:?}")]
    InvalidNumber(String),
}

/// A single geocoding backend
pub trait Geocoder {
    /// Short provider label used in progress output
    fn name(&self) -> &str;

    /// Look up an address, keeping the reason for a miss.
    fn lookup(&self, address: &str) -> Result<Coordinate, GeocodeError>;

    /// Look up an address; every failure becomes `None`.
    fn geocode(&self, address: &str) -> Option<Coordinate> {
        match self.lookup(address) {
            Ok(coordinate) => Some(coordinate),
            Err(GeocodeError::NoMatch) => {
                log::debug!("{}: no match for {}", self.name(), address);
                None
            }
            Err(e) => {
                log::warn!("{} API error ({}): {}", self.name(), address, e);
                None
            }
        }
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        (**self).lookup(address)
    }

    fn geocode(&self, address: &str) -> Option<Coordinate> {
        (**self).geocode(address)
    }
}

/// Send a prepared GET and return the body of a 2xx response
fn fetch_body(request: RequestBuilder) -> Result<String, GeocodeError> {
    let response = request.send()?;

    if !response.status().is_success() {
        return Err(GeocodeError::Status(response.status()));
    }

    Ok(response.text()?)
}
