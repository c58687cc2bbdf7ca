//! GeoJSON result document and operator summary.

use super::error::OutputError;
use super::processor::BatchOutcome;
use crate::domain::{AddressRecord, FailedSite, ResolvedSite};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionType {
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    #[serde(rename = "type")]
    pub kind: CollectionType,
    pub features: Vec<Feature>,
    pub metadata: Metadata,
    /// Only emitted when at least one row failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_sites: Option<Vec<FailedSite>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub properties: AddressRecord,
    pub geometry: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "type")]
    pub kind: GeometryType,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    /// Number of geocoded sites, i.e. `features.len()`
    pub total_sites: usize,
    pub failed_geocoding: usize,
    pub generated_at: String,
}

impl From<&ResolvedSite> for Feature {
    fn from(site: &ResolvedSite) -> Self {
        Feature {
            kind: FeatureType::Feature,
            properties: site.record.clone(),
            geometry: Point {
                kind: GeometryType::Point,
                coordinates: site.coordinate.to_position(),
            },
        }
    }
}

impl ResultDocument {
    pub fn new(outcome: &BatchOutcome, title: &str, generated_at: String) -> Self {
        let features: Vec<Feature> = outcome.resolved.iter().map(Feature::from).collect();

        ResultDocument {
            kind: CollectionType::FeatureCollection,
            metadata: Metadata {
                title: title.to_string(),
                total_sites: features.len(),
                failed_geocoding: outcome.failed.len(),
                generated_at,
            },
            features,
            failed_sites: (!outcome.failed.is_empty()).then(|| outcome.failed.clone()),
        }
    }

    pub fn failed(&self) -> &[FailedSite] {
        self.failed_sites.as_deref().unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Local wall-clock time in [`TIMESTAMP_FORMAT`]
pub fn generated_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Serialize the whole document and write it in one go
pub fn write_document(path: &Path, document: &ResultDocument) -> Result<(), OutputError> {
    let json = document.to_json()?;
    fs::write(path, json).map_err(|source| OutputError::NotWritable {
        path: path.to_path_buf(),
        source,
    })
}

/// Human-readable run summary, one line per entry
pub fn summary_lines(document: &ResultDocument, output: &Path) -> Vec<String> {
    let mut lines = vec![
        format!("  Geocoded: {}", document.metadata.total_sites),
        format!("  Failed:   {}", document.metadata.failed_geocoding),
        format!("  Output:   {}", output.display()),
    ];

    if !document.failed().is_empty() {
        lines.push(String::new());
        lines.push("Sites that could not be geocoded:".to_string());
        for site in document.failed() {
            lines.push(format!("  - {}: {}", site.name, site.address));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use serde_json::Value;
    use tempfile::tempdir;

    fn outcome(resolved: usize, failed: usize) -> BatchOutcome {
        BatchOutcome {
            resolved: (0..resolved)
                .map(|i| ResolvedSite {
                    record: AddressRecord::new(format!("施設{}", i), format!("杉並区{}", i)),
                    coordinate: Coordinate::new(35.7 + i as f64 * 0.01, 139.6),
                })
                .collect(),
            failed: (0..failed)
                .map(|i| AddressRecord::new(format!("失敗{}", i), "不明な場所"))
                .collect(),
        }
    }

    #[test]
    fn test_all_resolved_omits_failed_sites() {
        let doc = ResultDocument::new(&outcome(3, 0), "杉並区震災救援所", "2024-01-01 00:00:00".into());
        assert_eq!(doc.features.len(), 3);
        assert_eq!(doc.metadata.total_sites, 3);
        assert_eq!(doc.metadata.failed_geocoding, 0);
        assert!(doc.failed_sites.is_none());

        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert!(value.get("failed_sites").is_none());
        assert_eq!(value["type"], "FeatureCollection");
    }

    #[test]
    fn test_failures_are_listed() {
        let doc = ResultDocument::new(&outcome(1, 2), "t", "2024-01-01 00:00:00".into());
        assert_eq!(doc.failed().len(), doc.metadata.failed_geocoding);
        assert_eq!(doc.failed_sites.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_geometry_is_lon_lat() {
        let doc = ResultDocument::new(&outcome(1, 0), "t", "now".into());
        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        let feature = &value["features"][0];
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["properties"]["name"], "施設0");
        assert_eq!(feature["properties"]["address"], "杉並区0");
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"][0], 139.6);
        assert_eq!(feature["geometry"]["coordinates"][1], 35.7);
    }

    #[test]
    fn test_json_round_trip_keeps_shape() {
        for (ok, bad) in [(2, 0), (0, 2), (3, 1)] {
            let doc = ResultDocument::new(&outcome(ok, bad), "杉並区震災救援所", "x".into());
            let parsed: ResultDocument = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

            assert_eq!(parsed.features.len(), doc.features.len());
            assert_eq!(parsed.metadata, doc.metadata);
            assert_eq!(parsed.failed_sites.is_some(), doc.failed_sites.is_some());
        }
    }

    #[test]
    fn test_non_ascii_written_literally() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let doc = ResultDocument::new(&outcome(1, 1), "杉並区震災救援所", "x".into());

        write_document(&path, &doc).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("杉並区震災救援所"));
        assert!(written.contains("\n  \"features\""));
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.json");
        let doc = ResultDocument::new(&outcome(0, 0), "t", "x".into());

        let err = write_document(&path, &doc).unwrap_err();
        assert!(matches!(err, OutputError::NotWritable { .. }));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = generated_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_summary_lists_failures() {
        let doc = ResultDocument::new(&outcome(1, 1), "t", "x".into());
        let lines = summary_lines(&doc, Path::new("out.json"));

        assert!(lines.contains(&"  Output:   out.json".to_string()));
        assert_eq!(lines.last().unwrap(), "  - 失敗0: 不明な場所");

        let clean = ResultDocument::new(&outcome(1, 0), "t", "x".into());
        assert_eq!(summary_lines(&clean, Path::new("out.json")).len(), 3);
    }
}
