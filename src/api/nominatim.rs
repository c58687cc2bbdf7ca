use super::{GeocodeError, Geocoder, RawResponse, fetch_body};
use crate::config::ProviderConfig;
use crate::domain::Coordinate;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::USER_AGENT;

/// Client for the OpenStreetMap Nominatim search API.
///
/// Nominatim's usage policy requires an identifying `User-Agent` and at most
/// one request per second; the pacing is left to the caller.
pub struct NominatimClient {
    client: Client,
    url: String,
    user_agent: String,
    country_codes: String,
}

impl NominatimClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            url: config.nominatim_url.clone(),
            user_agent: config.user_agent.clone(),
            country_codes: config.country_codes.clone(),
        })
    }

    fn request(&self, address: &str) -> RequestBuilder {
        self.client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("q", address),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", self.country_codes.as_str()),
            ])
    }
}

impl Geocoder for NominatimClient {
    fn name(&self) -> &str {
        "Nominatim"
    }

    fn lookup(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let body = fetch_body(self.request(address))?;
        RawResponse::parse_nominatim(&body)?.first_coordinate()
    }
}
