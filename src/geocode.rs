use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const GEOCODER_USER_AGENT: &str = "auction-scout/0.1 (listing geocoder)";

/// Resolves a free-text address into coordinates.
///
/// One address string in, zero-or-one (lat, lon) pair out; a provider error
/// and a genuine miss look the same to callers. Trait seam so tests can
/// substitute a canned provider.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, query: &str) -> Option<(f64, f64)>;
}

/// Nominatim search hit; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

/// Nominatim-backed geocoder with built-in pacing.
///
/// Every `resolve` call sleeps for the configured cooldown after the lookup,
/// hit or miss, to stay within the provider's usage policy.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    cooldown: Duration,
}

impl NominatimGeocoder {
    pub fn new(cooldown: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(GEOCODER_USER_AGENT)
            .build()
            .context("Failed to create geocoding HTTP client")?;
        Ok(Self { client, cooldown })
    }

    async fn lookup(&self, query: &str) -> Result<Vec<NominatimHit>> {
        let hits = self
            .client
            .get(NOMINATIM_URL)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .context("Geocoding request failed")?
            .error_for_status()
            .context("Geocoding provider returned an error status")?
            .json()
            .await
            .context("Failed to decode geocoding response")?;
        Ok(hits)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, query: &str) -> Option<(f64, f64)> {
        debug!("Geocoding: {}", query);

        let coords = match self.lookup(query).await {
            Ok(hits) => first_coords(&hits),
            Err(e) => {
                warn!("Geocoding failed for '{}': {:#}", query, e);
                None
            }
        };
        if coords.is_none() {
            debug!("No geocoding match for '{}'", query);
        }

        // Unconditional pause per lookup, per provider usage policy.
        tokio::time::sleep(self.cooldown).await;

        coords
    }
}

/// First hit's coordinates, `None` when the hit list is empty or unparseable.
fn first_coords(hits: &[NominatimHit]) -> Option<(f64, f64)> {
    let hit = hits.first()?;
    let lat = hit.lat.parse().ok()?;
    let lon = hit.lon.parse().ok()?;
    Some((lat, lon))
}
