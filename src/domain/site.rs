use serde::{Deserialize, Serialize};

/// One input row: a facility and its postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub name: String,
    pub address: String,
}

impl AddressRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// A WGS84 point in (latitude, longitude) order.
///
/// No range check is applied; providers are trusted to return sane values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// GeoJSON position order: `[lon, lat]`
    pub fn to_position(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// A record that at least one provider could place on the map
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSite {
    pub record: AddressRecord,
    pub coordinate: Coordinate,
}

/// A record that no provider could resolve
pub type FailedSite = AddressRecord;
