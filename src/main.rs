mod geocode;
mod models;
mod scrapers;

use geocode::NominatimGeocoder;
use scrapers::{SantanderScraper, ScraperTrait, SiteConfig};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Auction Scout - Santander Imóveis Scraper");
    info!("=============================================");
    info!("");

    let config = SiteConfig::default();
    let geocoder = NominatimGeocoder::new(config.geocode_cooldown)?;
    let scraper = SantanderScraper::new(config, Box::new(geocoder))?;

    let listings = scraper.scrape().await?;

    // Display results
    info!("\n✅ Scraped {} listings\n", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        println!(
            "{}. {}",
            i + 1,
            listing.title.as_deref().unwrap_or("(sem título)")
        );
        if let (Some(value), Some(evaluation)) = (&listing.value, &listing.evaluation) {
            println!("   Lance mínimo: {} | Avaliação: {}", value, evaluation);
        }
        if let Some(date) = &listing.date {
            println!("   Leilão: {}", date);
        }
        if let (Some(lat), Some(lon)) = (listing.latitude, listing.longitude) {
            println!("   Coordenadas: {}, {}", lat, lon);
        }
        println!("   URL: {}", listing.source_url);
        println!();
    }

    // Save to JSON file
    let json = serde_json::to_string_pretty(&listings)?;
    tokio::fs::write("listings.json", json).await?;
    info!("💾 Saved {} listings to listings.json", listings.len());

    Ok(())
}
