//! Raw provider payloads.
//!
//! The two services disagree on shape and axis order, so each keeps its own
//! decoder and both normalize to [`Coordinate`] here.

use super::GeocodeError;
use crate::domain::Coordinate;
use serde::Deserialize;

/// `AddressSearch` result: a GeoJSON-like feature with `[lon, lat]` coordinates
#[derive(Debug, Deserialize)]
pub struct GsiFeature {
    #[serde(default)]
    pub geometry: Option<GsiGeometry>,
    #[serde(default)]
    pub properties: Option<GsiProperties>,
}

#[derive(Debug, Deserialize)]
pub struct GsiGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GsiProperties {
    #[serde(default)]
    pub title: Option<String>,
}

/// Nominatim `format=json` result; numbers arrive as strings
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug)]
pub enum RawResponse {
    Gsi(Vec<GsiFeature>),
    Nominatim(Vec<NominatimPlace>),
}

impl RawResponse {
    /// Decode a GSI body. A JSON `null` is treated as an empty result set.
    pub fn parse_gsi(body: &str) -> Result<Self, GeocodeError> {
        let features: Option<Vec<GsiFeature>> = serde_json::from_str(body)?;
        Ok(RawResponse::Gsi(features.unwrap_or_default()))
    }

    pub fn parse_nominatim(body: &str) -> Result<Self, GeocodeError> {
        let places: Option<Vec<NominatimPlace>> = serde_json::from_str(body)?;
        Ok(RawResponse::Nominatim(places.unwrap_or_default()))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawResponse::Gsi(features) => features.is_empty(),
            RawResponse::Nominatim(places) => places.is_empty(),
        }
    }

    /// Coordinate of the first result, in (lat, lon) order
    pub fn first_coordinate(&self) -> Result<Coordinate, GeocodeError> {
        match self {
            RawResponse::Gsi(features) => {
                let feature = features.first().ok_or(GeocodeError::NoMatch)?;
                match feature.geometry.as_ref().map(|g| g.coordinates.as_slice()) {
                    Some([lon, lat, ..]) => Ok(Coordinate::new(*lat, *lon)),
                    _ => Err(GeocodeError::MissingCoordinates),
                }
            }
            RawResponse::Nominatim(places) => {
                let place = places.first().ok_or(GeocodeError::NoMatch)?;
                let lat = parse_number(&place.lat)?;
                let lon = parse_number(&place.lon)?;
                Ok(Coordinate::new(lat, lon))
            }
        }
    }
}

fn parse_number(value: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidNumber(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gsi_swaps_axis_order() {
        let json = r#"[{"geometry":{"coordinates":[139.636,35.699],"type":"Point"},"type":"Feature","properties":{"addressCode":"","title":"東京都杉並区阿佐谷南一丁目"}}]"#;
        let response = RawResponse::parse_gsi(json).unwrap();
        let c = response.first_coordinate().unwrap();
        assert_eq!(c, Coordinate::new(35.699, 139.636));
    }

    #[test]
    fn test_gsi_empty_and_null_are_no_match() {
        for body in ["[]", "null"] {
            let response = RawResponse::parse_gsi(body).unwrap();
            assert!(response.is_empty());
            assert!(matches!(
                response.first_coordinate(),
                Err(GeocodeError::NoMatch)
            ));
        }
    }

    #[test]
    fn test_gsi_short_coordinates() {
        let response = RawResponse::parse_gsi(r#"[{"geometry":{"coordinates":[139.6]}}]"#).unwrap();
        assert!(matches!(
            response.first_coordinate(),
            Err(GeocodeError::MissingCoordinates)
        ));

        let response = RawResponse::parse_gsi(r#"[{"properties":{"title":"x"}}]"#).unwrap();
        assert!(matches!(
            response.first_coordinate(),
            Err(GeocodeError::MissingCoordinates)
        ));
    }

    #[test]
    fn test_nominatim_keeps_lat_lon_order() {
        let json = r#"[{"lat":"35.6994","lon":"139.6364","display_name":"杉並区, 東京都, 日本"}]"#;
        let response = RawResponse::parse_nominatim(json).unwrap();
        let c = response.first_coordinate().unwrap();
        assert_eq!(c, Coordinate::new(35.6994, 139.6364));
    }

    #[test]
    fn test_nominatim_bad_number() {
        let response = RawResponse::parse_nominatim(r#"[{"lat":"north","lon":"139.6"}]"#).unwrap();
        assert!(matches!(
            response.first_coordinate(),
            Err(GeocodeError::InvalidNumber(v)) if v == "north"
        ));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        assert!(matches!(
            RawResponse::parse_nominatim("<html>busy</html>"),
            Err(GeocodeError::Decode(_))
        ));
        assert!(matches!(
            RawResponse::parse_gsi(r#"{"error":"x"}"#),
            Err(GeocodeError::Decode(_))
        ));
    }
}
