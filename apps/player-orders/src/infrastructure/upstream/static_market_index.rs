//! Fixed market index table.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::application::ports::{MarketIndexPort, UpstreamError};
use crate::domain::player_order::TemplateCode;

/// Market index from configuration, optionally per template family.
#[derive(Debug, Clone)]
pub struct StaticMarketIndex {
    default_index: Decimal,
    per_template: BTreeMap<TemplateCode, Decimal>,
}

impl StaticMarketIndex {
    /// Index used for every template.
    #[must_use]
    pub const fn new(default_index: Decimal) -> Self {
        Self {
            default_index,
            per_template: BTreeMap::new(),
        }
    }

    /// Override the index for one template family.
    #[must_use]
    pub fn with_template_index(mut self, template: TemplateCode, index: Decimal) -> Self {
        self.per_template.insert(template, index);
        self
    }
}

#[async_trait]
impl MarketIndexPort for StaticMarketIndex {
    async fn market_index(&self, template: Option<TemplateCode>) -> Result<Decimal, UpstreamError> {
        Ok(template
            .and_then(|code| self.per_template.get(&code).copied())
            .unwrap_or(self.default_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn falls_back_to_default() {
        let index = StaticMarketIndex::new(dec!(10)).with_template_index(TemplateCode::Hacker, dec!(14));
        assert_eq!(index.market_index(None).await.unwrap(), dec!(10));
        assert_eq!(
            index.market_index(Some(TemplateCode::Combat)).await.unwrap(),
            dec!(10)
        );
        assert_eq!(
            index.market_index(Some(TemplateCode::Hacker)).await.unwrap(),
            dec!(14)
        );
    }
}
