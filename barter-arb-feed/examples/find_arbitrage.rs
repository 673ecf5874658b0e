//! Example: Fetch live Kalshi and Polymarket events and print arbitrage opportunities.
//!
//! Usage:
//!   cargo run -p barter-arb-feed --example find_arbitrage
//!
//! Optional environment variables (or a `.env` file):
//!   SIMILARITY_THRESHOLD=75   # Minimum title/outcome similarity, 0-100 (default: 75)
//!   MIN_PROFIT=2              # Minimum guaranteed profit per stake (default: 2)
//!   MAX_DAYS_LEFT=30          # Only events ending within N days (default: unset)
//!   MIN_DAYS_LEFT=1           # Only events ending in at least N days (default: unset)
//!   STAKE=100                 # Capital split across both legs (default: 100)
//!   SORT_BY=profit            # none | similarity | profit (default: none)

use barter_arb_feed::{EventSource, GammaEventsClient, KalshiFeedClient};
use barter_arb_scanner::{ArbitrageScanner, ScannerConfig, render_report};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    // Loaded before logging so RUST_LOG may come from the .env file
    let dotenv = dotenvy::dotenv();
    init_logging();
    if let Err(e) = dotenv {
        debug!("No .env file loaded: {}", e);
    }

    let config = ScannerConfig::from_env();
    info!(?config, "Loaded scanner configuration");

    let scanner = match ArbitrageScanner::new(config) {
        Ok(scanner) => scanner,
        Err(e) => {
            error!("Invalid scanner configuration: {}", e);
            return;
        }
    };

    let (kalshi, polymarket) = match (KalshiFeedClient::new(), GammaEventsClient::new()) {
        (Ok(kalshi), Ok(polymarket)) => (kalshi, polymarket),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to build feed clients: {}", e);
            return;
        }
    };

    info!("Fetching Kalshi and Polymarket events...");
    let (kalshi, polymarket) = tokio::join!(kalshi.fetch_snapshot(), polymarket.fetch_snapshot());

    let kalshi = match kalshi {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to fetch Kalshi events: {}", e);
            return;
        }
    };
    let polymarket = match polymarket {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to fetch Polymarket events: {}", e);
            return;
        }
    };

    let opportunities = scanner.scan(&kalshi, &polymarket);
    println!("{}", render_report(&opportunities));
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "barter_arb_scanner=info,barter_arb_feed=info,find_arbitrage=info".into()),
        )
        .init();
}
