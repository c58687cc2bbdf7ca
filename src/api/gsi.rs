use super::{GeocodeError, Geocoder, RawResponse, fetch_body};
use crate::config::ProviderConfig;
use crate::domain::Coordinate;
use reqwest::blocking::{Client, RequestBuilder};

/// Client for the GSI (Geospatial Information Authority of Japan) address search.
///
/// The endpoint only covers Japanese addresses and needs no identifying header.
pub struct GsiClient {
    client: Client,
    url: String,
}

impl GsiClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            url: config.gsi_url.clone(),
        })
    }

    fn request(&self, address: &str) -> RequestBuilder {
        self.client.get(&self.url).query(&[("q", address)])
    }
}

impl Geocoder for GsiClient {
    fn name(&self) -> &str {
        "GSI"
    }

    fn lookup(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let body = fetch_body(self.request(address))?;
        RawResponse::parse_gsi(&body)?.first_coordinate()
    }
}
