//! Venue Event Feeds for the Barter Arbitrage Scanner
//!
//! Fetches open events from Kalshi and Polymarket over their public REST APIs
//! and normalizes them into the [`NormalizedEvent`] shape consumed by
//! [`barter_arb_scanner::ArbitrageScanner`].
//!
//! # Key Components
//!
//! - [`EventSource`]: Async source of normalized events for one venue
//! - [`KalshiFeedClient`]: Kalshi `users/feed` endpoint
//! - [`GammaEventsClient`]: Polymarket gamma `events` endpoint
//!
//! # Normalization
//!
//! Both venues group their contracts under events. Normalizers flatten each
//! venue's markets into [`Outcome`]s priced in percentage points, consolidate
//! them per event, and drop any outcome that breaks the YES/NO price model.
//!
//! # Example
//!
//! ```rust,ignore
//! use barter_arb_feed::{EventSource, GammaEventsClient, KalshiFeedClient};
//!
//! let kalshi = KalshiFeedClient::new()?.fetch_snapshot().await?;
//! let polymarket = GammaEventsClient::new()?.fetch_snapshot().await?;
//! ```

use async_trait::async_trait;
use barter_arb_scanner::{NormalizedEvent, Outcome, Venue, VenueSnapshot};
use tracing::warn;

pub mod error;
pub mod kalshi;
pub mod polymarket;

mod http;

pub use error::FeedError;
pub use kalshi::KalshiFeedClient;
pub use polymarket::{GammaEventsClient, GammaEventsQuery};

/// Source of normalized events for a single venue.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Venue the events are quoted on.
    fn venue(&self) -> Venue;

    /// Fetch and normalize every open event.
    async fn fetch_events(&self) -> Result<Vec<NormalizedEvent>, FeedError>;

    /// Fetch events wrapped in a [`VenueSnapshot`].
    async fn fetch_snapshot(&self) -> Result<VenueSnapshot, FeedError> {
        let events = self.fetch_events().await?;
        Ok(VenueSnapshot::new(self.venue(), events))
    }
}

/// Check an outcome against the price model, logging any violation.
pub(crate) fn is_valid_outcome(venue: &Venue, title: &str, outcome: &Outcome) -> bool {
    match outcome.validate() {
        Ok(()) => true,
        Err(error) => {
            warn!(
                %venue,
                title,
                label = ?outcome.label,
                %error,
                "Dropping outcome with invalid prices"
            );
            false
        }
    }
}
