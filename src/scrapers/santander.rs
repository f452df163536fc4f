use crate::geocode::Geocoder;
use crate::models::Listing;
use crate::scrapers::config::SiteConfig;
use crate::scrapers::normalize;
use crate::scrapers::page::PageDocument;
use crate::scrapers::traits::ScraperTrait;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Santander Imóveis auction-listing scraper.
///
/// Fetches each configured listing page, extracts and normalizes its fields,
/// geocodes the sliced address and assembles one `Listing` per page.
pub struct SantanderScraper {
    client: Client,
    config: SiteConfig,
    geocoder: Box<dyn Geocoder>,
}

impl SantanderScraper {
    pub fn new(config: SiteConfig, geocoder: Box<dyn Geocoder>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            geocoder,
        })
    }

    /// Fetch one listing page with a user agent drawn from the configured pool.
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(agent) = self.config.user_agents.choose(&mut rand::thread_rng()) {
            request = request.header(USER_AGENT, agent.as_str());
        }

        let response = request
            .send()
            .await
            .context("Failed to fetch listing page")?;

        if !response.status().is_success() {
            warn!("Santander returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listing page: {}", response.status());
        }

        response.text().await.context("Failed to read response body")
    }

    /// Scrape a single listing page into a record.
    pub async fn scrape_listing(&self, url: &str) -> Result<Listing> {
        debug!("Fetching listing: {}", url);
        let body = self.fetch(url).await?;
        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(self.process_page(&body, url).await)
    }

    /// Extract, normalize and geocode one fetched page body.
    ///
    /// Always produces a record: extraction failures surface as `None` fields,
    /// never as errors.
    async fn process_page(&self, body: &str, url: &str) -> Listing {
        let (mut listing, geocode_query) = self.parse_listing(body, url);

        if let Some(query) = geocode_query {
            if let Some((lat, lon)) = self.geocoder.resolve(&query).await {
                listing.latitude = Some(lat);
                listing.longitude = Some(lon);
            }
        }

        listing
    }

    /// Pure extraction pass: page body in, record plus geocoding query out.
    ///
    /// Coordinates are left empty here; the caller resolves them. The query is
    /// only composed when the address paragraph matched its template.
    fn parse_listing(&self, body: &str, url: &str) -> (Listing, Option<String>) {
        let sel = &self.config.selectors;
        let offsets = &self.config.offsets;
        let doc = PageDocument::parse(body, &sel.json_ld);

        let title = doc.text(&sel.title);
        let property_type = title.as_deref().and_then(normalize::first_token);

        let auctioneer = doc.text(&sel.contact_name);
        let target_url = doc.attr(&sel.contact_link, "href");
        let auctioneer_url = target_url.as_deref().and_then(normalize::host_prefix);

        let description = doc.text(&sel.description);
        let registration = doc.text(&sel.registration);
        let registry = doc.text(&sel.registry);

        let source_id = doc
            .text(&sel.badge)
            .and_then(|badge| normalize::char_span(&badge, offsets.source_id));

        // "Desocupado" contains "ocupado", so vacant listings also read false.
        let is_vacant = doc
            .text(&sel.status)
            .map_or(true, |status| !status.to_lowercase().contains("ocupado"));

        let evaluation = doc.text(&sel.evaluation).map(|v| normalize::digits_only(&v));
        let value = doc.text(&sel.value).map(|v| normalize::digits_only(&v));

        let date = normalize::first_datetime(&doc.texts(&sel.paragraphs));

        let (land_area, total_area) = doc
            .text(&sel.area)
            .and_then(|area| normalize::split_area(&area, offsets))
            .map_or((None, None), |(land, total)| (Some(land), Some(total)));

        let image_url = doc.json_ld().and_then(image_object_url);

        let parts = doc
            .text(&sel.address_paragraph)
            .and_then(|paragraph| normalize::split_address(&paragraph, offsets));
        let geocode_query = parts.as_ref().map(|p| p.geocode_query());
        let (address, neighborhood, city, state, zip_code) = match parts {
            Some(p) => (
                Some(p.address),
                Some(p.neighborhood),
                Some(p.city),
                Some(p.state),
                Some(p.zip_code),
            ),
            None => (None, None, None, None, None),
        };

        let listing = Listing {
            title,
            evaluation,
            value,
            date,
            property_type,
            // Not published on the listing page; fixed at zero.
            rooms: 0,
            parking_spots: 0,
            private_area: 0,
            land_area,
            total_area,
            auctioneer,
            auctioneer_url,
            target_url,
            is_vacant,
            description,
            registry,
            registration,
            image_url,
            state,
            city,
            neighborhood,
            address,
            zip_code,
            latitude: None,
            longitude: None,
            source_id,
            source_url: url.to_string(),
        };

        (listing, geocode_query)
    }
}

/// Url of the first ImageObject node in the JSON-LD @graph list.
fn image_object_url(data: &Value) -> Option<String> {
    data.get("@graph")?
        .as_array()?
        .iter()
        .find(|node| node.get("@type").and_then(Value::as_str) == Some("ImageObject"))?
        .get("url")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl ScraperTrait for SantanderScraper {
    async fn scrape(&self) -> Result<Vec<Listing>> {
        info!(
            "Starting Santander Imóveis scrape ({} listing pages)",
            self.config.start_urls.len()
        );

        let mut listings = Vec::new();
        for url in &self.config.start_urls {
            match self.scrape_listing(url).await {
                Ok(listing) => listings.push(listing),
                // One bad page must not take down the rest of the run.
                Err(e) => warn!("Skipping {}: {:#}", url, e),
            }
        }

        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Santander Imóveis"
    }
}
