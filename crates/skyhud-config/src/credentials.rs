//! Map-tile service credentials.
//!
//! The credential pair is optional. Its absence, or the placeholder key that
//! ships in sample configs, means "use the procedural backdrop".

use crate::MapConfig;

/// Environment variable that overrides [`MapConfig::api_key`].
pub const API_KEY_ENV: &str = "SKYHUD_MAPS_API_KEY";

/// Environment variable that overrides [`MapConfig::map_id`].
pub const MAP_ID_ENV: &str = "SKYHUD_MAPS_MAP_ID";

/// Key value shipped in templates; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GOOGLE_MAPS_API_KEY";

/// A usable credential pair for the tile service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCredentials {
    /// API key.
    pub api_key: String,
    /// Map style identifier; may be empty.
    pub map_id: String,
}

impl MapCredentials {
    /// Resolve credentials from the process environment (and `.env`), falling
    /// back to `map`.
    pub fn resolve(map: &MapConfig) -> Option<Self> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            log::warn!("Ignoring unreadable .env file: {e}");
        }
        Self::resolve_with(map, |name| std::env::var(name).ok())
    }

    /// Resolve credentials using `lookup` for environment overrides.
    pub fn resolve_with(map: &MapConfig, lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup(API_KEY_ENV).or_else(|| map.api_key.clone())?;
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            return None;
        }
        let map_id = lookup(MAP_ID_ENV).unwrap_or_else(|| map.map_id.clone());
        Some(Self { api_key, map_id })
    }
}
