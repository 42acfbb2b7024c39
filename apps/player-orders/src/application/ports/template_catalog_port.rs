//! Template Catalog Port (Driven Port)

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::player_order::{PlayerOrderTemplate, TemplateCode};

/// Port for the content collaborator's order templates.
#[async_trait]
pub trait TemplateCatalogPort: Send + Sync {
    /// Look up a template. `None` when the content service does not offer it.
    async fn find_template(
        &self,
        code: TemplateCode,
    ) -> Result<Option<PlayerOrderTemplate>, UpstreamError>;

    /// All templates currently offered.
    async fn list_templates(&self) -> Result<Vec<PlayerOrderTemplate>, UpstreamError>;
}
