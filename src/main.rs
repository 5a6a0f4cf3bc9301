use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use gompa::{
    Catalog, Coordinates, EventCalendar, FixedLocationSource, GompaConfig, LocationProvider,
    MemoryStore, RecommendationService, SimulatedPlaces, format_distance, search_monasteries,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GompaConfig::load().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let catalog = Catalog::load_embedded()?;
    let query = std::env::args().nth(1).unwrap_or_default();

    let matches = search_monasteries(catalog.all(), &query, None, None);
    println!(
        "Showing {} of {} monasteries matching '{query}':",
        matches.len(),
        catalog.len()
    );
    for monastery in &matches {
        println!(
            "  - {} ({}, {} district, founded {})",
            monastery.name, monastery.sect, monastery.district, monastery.founded
        );
    }

    // Visitor standing on MG Marg in central Gangtok
    let visitor = Coordinates::new(27.3314, 88.6138);
    let provider = LocationProvider::new(MemoryStore::new(), FixedLocationSource::new(visitor))
        .with_options(config.position_options())
        .with_freshness_window(config.freshness_window());
    let state = provider.request_location().await?;

    let service = RecommendationService::new(
        SimulatedPlaces::new()
            .with_delay(Duration::from_millis(u64::from(config.nearby.delay_ms)))
            .with_limit(config.nearby.max_results as usize),
    );
    if let Some(snapshot) = service.refresh_from(&state).await {
        println!("\nLodging near you:");
        for lodging in &snapshot.data.lodging {
            println!(
                "  - {} ({} away, rated {}) - {}",
                lodging.name,
                format_distance(lodging.distance_km),
                lodging.rating,
                lodging.price_per_night
            );
        }
        println!("Attractions near you:");
        for attraction in &snapshot.data.attractions {
            println!(
                "  - {} ({} away) - {}",
                attraction.name,
                format_distance(attraction.distance_km),
                attraction.category
            );
        }
    }

    let calendar = EventCalendar::load_embedded()?;
    println!("\nCultural calendar:");
    for event in calendar.all().iter().take(3) {
        println!("  - {} at {} ({})", event.name, event.monastery, event.date);
    }

    Ok(())
}
