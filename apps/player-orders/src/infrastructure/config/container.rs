//! Dependency Injection Container
//!
//! Wires the lifecycle service and its adapters from configuration.

use std::sync::Arc;

use crate::application::ports::{DomainValidatorPort, UpstreamError};
use crate::application::services::{
    LifecycleCollaborators, OrderLifecycleService, ValidationAggregator,
};
use crate::config::Config;
use crate::domain::order_budget::BudgetEngine;
use crate::domain::order_guarantee::GuaranteeSelector;
use crate::domain::order_validation::ValidationSource;
use crate::domain::shared::{FactionId, ZoneId};
use crate::infrastructure::events::LoggingEventPublisher;
use crate::infrastructure::persistence::InMemoryPlayerOrderRepository;
use crate::infrastructure::upstream::{
    HttpDomainValidator, InMemoryTemplateCatalog, SocialRulesValidator, StaticDomainValidator,
    StaticMarketIndex, StaticRiskIntel,
};

/// Lifecycle service as wired for the binary.
pub type PlayerOrderService =
    OrderLifecycleService<InMemoryPlayerOrderRepository, LoggingEventPublisher>;

/// Dependency injection container.
///
/// Holds the wired service and the repository behind it.
pub struct Container {
    repository: Arc<InMemoryPlayerOrderRepository>,
    service: Arc<PlayerOrderService>,
}

impl Container {
    /// Wire every component from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP validator cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let repository = Arc::new(InMemoryPlayerOrderRepository::new());
        let aggregator = build_aggregator(config)?;

        let collaborators = LifecycleCollaborators {
            risk_intel: Arc::new(build_risk_intel(config)),
            market_index: Arc::new(build_market_index(config)),
            templates: Arc::new(InMemoryTemplateCatalog::with_defaults()),
        };

        let service = OrderLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(LoggingEventPublisher),
            aggregator,
            collaborators,
        )
        .with_budget_engine(BudgetEngine::new(config.budget.to_policy()))
        .with_guarantee_selector(GuaranteeSelector::new(
            config.guarantees.to_pricing(config.budget.minor_units),
        ));

        Ok(Self {
            repository,
            service: Arc::new(service),
        })
    }

    /// Get the lifecycle service.
    #[must_use]
    pub fn service(&self) -> Arc<PlayerOrderService> {
        Arc::clone(&self.service)
    }

    /// Get the order repository.
    #[must_use]
    pub fn repository(&self) -> Arc<InMemoryPlayerOrderRepository> {
        Arc::clone(&self.repository)
    }
}

fn build_aggregator(config: &Config) -> Result<ValidationAggregator, UpstreamError> {
    let settings = &config.validation;
    let mut aggregator = ValidationAggregator::new(settings.default_timeout())
        .with_validator(Arc::new(SocialRulesValidator::new()));

    for source in ValidationSource::ALL {
        let timeout = settings
            .timeout_for(source)
            .unwrap_or_else(|| settings.default_timeout());
        aggregator = aggregator.with_timeout(source, timeout);
        if source == ValidationSource::Social {
            continue;
        }

        let validator: Option<Arc<dyn DomainValidatorPort>> =
            match settings.endpoint_for(source) {
                Some(endpoint) => Some(Arc::new(HttpDomainValidator::new(
                    source, endpoint, timeout,
                )?)),
                None if settings.allow_static_sources => {
                    tracing::warn!(source = %source, "No endpoint configured; accepting all drafts");
                    Some(Arc::new(StaticDomainValidator::accept_all(source)))
                }
                None => {
                    tracing::warn!(source = %source, "No endpoint configured; source will be unavailable");
                    None
                }
            };
        if let Some(validator) = validator {
            aggregator = aggregator.with_validator(validator);
        }
    }
    Ok(aggregator)
}

fn build_risk_intel(config: &Config) -> StaticRiskIntel {
    let settings = &config.risk_intel;
    let zones = |names: &[String]| names.iter().map(ZoneId::new).collect::<Vec<_>>();
    settings.hostile_factions.iter().fold(
        StaticRiskIntel::new()
            .with_illegal_zones(zones(&settings.illegal_zones))
            .with_grey_zones(zones(&settings.grey_zones))
            .with_extreme_zones(zones(&settings.extreme_zones)),
        |intel, (zone, factions)| {
            intel.with_hostile_factions(ZoneId::new(zone), factions.iter().map(FactionId::new))
        },
    )
}

fn build_market_index(config: &Config) -> StaticMarketIndex {
    let settings = &config.risk_intel;
    settings.market_index_overrides.iter().fold(
        StaticMarketIndex::new(settings.default_market_index),
        |index, (code, value)| index.with_template_index(*code, *value),
    )
}
