pub mod site;

pub use site::{AddressRecord, Coordinate, FailedSite, ResolvedSite};
