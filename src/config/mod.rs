use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INPUT: &str = "evacuation_sites.csv";
pub const DEFAULT_OUTPUT: &str = "evacuation_sites_geocoded.json";
pub const DEFAULT_TITLE: &str = "杉並区震災救援所";

/// Required header names of the input table.
pub mod columns {
    pub const NAME: &str = "施設名";
    pub const ADDRESS: &str = "所在地";
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub providers: Option<ProviderConfig>,
    #[serde(default)]
    pub pacing: Option<PacingConfig>,
}

fn default_gsi_url() -> String {
    "https://msearch.gsi.go.jp/address-search/AddressSearch".to_string()
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "EvacuationSiteMapper/1.0".to_string()
}

fn default_country_codes() -> String {
    "jp".to_string()
}

/// Endpoints and request settings shared by both geocoding clients
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    #[serde(default = "default_gsi_url")]
    pub gsi_url: String,
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent as `User-Agent` to Nominatim only
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Comma separated ISO 3166-1 alpha-2 codes for Nominatim's `countrycodes`
    #[serde(default = "default_country_codes")]
    pub country_codes: String,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            gsi_url: default_gsi_url(),
            nominatim_url: default_nominatim_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            country_codes: default_country_codes(),
        }
    }
}

fn default_inter_provider_delay_ms() -> u64 {
    1000
}

fn default_inter_row_delay_ms() -> u64 {
    500
}

/// Courtesy delays toward the third-party services
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Wait between a failed GSI lookup and the Nominatim fallback
    #[serde(default = "default_inter_provider_delay_ms")]
    pub inter_provider_delay_ms: u64,
    /// Wait after every row, resolved or not
    #[serde(default = "default_inter_row_delay_ms")]
    pub inter_row_delay_ms: u64,
}

impl PacingConfig {
    pub fn inter_provider_delay(&self) -> Duration {
        Duration::from_millis(self.inter_provider_delay_ms)
    }

    pub fn inter_row_delay(&self) -> Duration {
        Duration::from_millis(self.inter_row_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            inter_provider_delay_ms: default_inter_provider_delay_ms(),
            inter_row_delay_ms: default_inter_row_delay_ms(),
        }
    }
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("shelter-geocoder.toml"));
    paths.push(PathBuf::from(".shelter-geocoder.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("shelter-geocoder").join("config.toml"));
        paths.push(config_dir.join("shelter-geocoder.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".shelter-geocoder.toml"));
    }

    paths
}
