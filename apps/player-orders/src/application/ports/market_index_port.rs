//! Market Index Port (Driven Port)
//!
//! The economy collaborator's current price level, used when a budget update
//! does not carry its own market index.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::UpstreamError;
use crate::domain::player_order::TemplateCode;

/// Port for reading the economy's market index.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketIndexPort: Send + Sync {
    /// Current index for orders of the given template family.
    async fn market_index(&self, template: Option<TemplateCode>) -> Result<Decimal, UpstreamError>;
}
