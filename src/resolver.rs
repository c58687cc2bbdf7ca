//! Two-provider fallback.
//!
//! GSI is asked first. Only when it has nothing does the resolver wait out the
//! inter-provider delay and ask Nominatim.

use crate::api::Geocoder;
use crate::domain::Coordinate;
use std::thread;
use std::time::Duration;

/// Blocking wait between outbound requests
pub trait Pause {
    fn pause(&self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl<P: Pause + ?Sized> Pause for &P {
    fn pause(&self, duration: Duration) {
        (**self).pause(duration)
    }
}

/// Which backend produced a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub coordinate: Coordinate,
    pub source: Source,
    pub provider: String,
}

pub struct FallbackResolver<P, F, Z> {
    primary: P,
    fallback: F,
    pause: Z,
    inter_provider_delay: Duration,
}

impl<P: Geocoder, F: Geocoder, Z: Pause> FallbackResolver<P, F, Z> {
    pub fn new(primary: P, fallback: F, pause: Z, inter_provider_delay: Duration) -> Self {
        Self {
            primary,
            fallback,
            pause,
            inter_provider_delay,
        }
    }

    pub fn pause(&self) -> &Z {
        &self.pause
    }

    /// Resolve an address, reporting which provider answered.
    pub fn resolve(&self, address: &str) -> Option<Resolution> {
        log::info!("Geocoding: {}", address);

        if let Some(coordinate) = self.primary.geocode(address) {
            log::info!(
                "  -> ok ({}): {:.6}, {:.6}",
                self.primary.name(),
                coordinate.latitude,
                coordinate.longitude
            );
            return Some(Resolution {
                coordinate,
                source: Source::Primary,
                provider: self.primary.name().to_string(),
            });
        }

        self.pause.pause(self.inter_provider_delay);

        if let Some(coordinate) = self.fallback.geocode(address) {
            log::info!(
                "  -> ok ({}): {:.6}, {:.6}",
                self.fallback.name(),
                coordinate.latitude,
                coordinate.longitude
            );
            return Some(Resolution {
                coordinate,
                source: Source::Fallback,
                provider: self.fallback.name().to_string(),
            });
        }

        log::info!("  -> failed: no provider returned coordinates");
        None
    }

    pub fn resolve_coordinate(&self, address: &str) -> Option<Coordinate> {
        self.resolve(address).map(|r| r.coordinate)
    }
}
