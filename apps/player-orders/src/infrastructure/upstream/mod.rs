//! Upstream adapters for the driven ports.

mod http_validator;
mod in_memory_catalog;
mod social_validator;
mod static_market_index;
mod static_risk_intel;
mod static_validator;

pub use http_validator::HttpDomainValidator;
pub use in_memory_catalog::InMemoryTemplateCatalog;
pub use social_validator::SocialRulesValidator;
pub use static_market_index::StaticMarketIndex;
pub use static_risk_intel::StaticRiskIntel;
pub use static_validator::StaticDomainValidator;
