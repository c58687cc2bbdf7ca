//! shelter-geocoder - Geocode facility address lists into GeoJSON with GSI/Nominatim fallback

pub mod api;
pub mod batch;
pub mod config;
pub mod domain;
pub mod resolver;
