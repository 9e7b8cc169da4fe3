// ============================================================================
// Venue Builder
// ============================================================================

use crate::domain::VenueConfig;
use crate::interfaces::{NoOpSink, NotificationSink, Repository};
use crate::storage::InMemoryRepository;
use crate::venue::{Venue, VenueResult};
use std::sync::Arc;

/// Builder for creating venues with fluent API
///
/// Defaults to [`VenueConfig::default`], an [`InMemoryRepository`] and a
/// [`NoOpSink`].
///
/// # Example
/// ```
/// use bond_venue::prelude::*;
/// use std::sync::Arc;
///
/// let config = VenueConfig::bond_desk();
/// let registry = Arc::new(SubscriberRegistry::from_config(&config));
/// let venue = VenueBuilder::new()
///     .with_config(config)
///     .with_sink(registry.clone())
///     .build()
///     .unwrap();
///
/// assert_eq!(venue.seed_demo_instruments().unwrap(), 2);
/// ```
#[derive(Default)]
pub struct VenueBuilder {
    config: VenueConfig,
    repository: Option<Arc<dyn Repository>>,
    sink: Option<Arc<dyn NotificationSink>>,
}

impl VenueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: VenueConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_repository(mut self, repository: Arc<dyn Repository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build an empty venue
    pub fn build(self) -> VenueResult<Venue> {
        let (config, repository, sink) = self.into_parts();
        Venue::new(config, repository, sink)
    }

    /// Build a venue preloaded from the configured repository
    pub fn restore(self) -> VenueResult<Venue> {
        let (config, repository, sink) = self.into_parts();
        Venue::restore(config, repository, sink)
    }

    fn into_parts(self) -> (VenueConfig, Arc<dyn Repository>, Arc<dyn NotificationSink>) {
        (
            self.config,
            self.repository
                .unwrap_or_else(|| Arc::new(InMemoryRepository::new())),
            self.sink.unwrap_or_else(|| Arc::new(NoOpSink)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::api::{InstrumentRequest, OrderRequest};
    use crate::venue::VenueError;
    use rust_decimal::Decimal;

    #[test]
    fn test_defaults() {
        let venue = VenueBuilder::new().build().unwrap();
        assert_eq!(venue.config().default_trade_limit, 100);
        assert!(venue.instruments().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = VenueBuilder::new()
            .with_config(VenueConfig::new().with_subscriber_capacity(0))
            .build();
        assert!(matches!(result, Err(VenueError::InvalidArgument(_))));
    }

    #[test]
    fn test_restore_from_shared_repository() {
        let repo = Arc::new(InMemoryRepository::new());
        let venue = VenueBuilder::new()
            .with_repository(repo.clone())
            .build()
            .unwrap();
        venue
            .register_instrument(InstrumentRequest::new("X", "X Corp", Decimal::from(5), "2030"))
            .unwrap();
        venue
            .submit_order(OrderRequest::new("X", "buy", Decimal::from(99), Decimal::from(10)))
            .unwrap();

        let restored = VenueBuilder::new().with_repository(repo).restore().unwrap();

        assert_eq!(restored.instruments().len(), 1);
        assert_eq!(restored.order_book("X").unwrap().bids.len(), 1);
    }
}
