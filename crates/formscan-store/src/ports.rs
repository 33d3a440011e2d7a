use async_trait::async_trait;
use formscan_core::error::Result;
use formscan_core::models::{NewTemplate, Template, TemplateId, TemplateUpdate};

/// Port for template persistence.
///
/// Backends own timeouts and retries; callers see whatever error the
/// backend reports.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Validate and store a new template, assigning its id and timestamps
    async fn create(&self, template: NewTemplate) -> Result<Template>;

    /// All stored templates, in no particular order
    async fn list(&self) -> Result<Vec<Template>>;

    /// Fetch one template; fails with `NotFound` if absent
    async fn get(&self, id: TemplateId) -> Result<Template>;

    /// Merge the supplied attributes into a stored template
    async fn update(&self, id: TemplateId, update: TemplateUpdate) -> Result<Template>;

    /// Remove a template; deleting an absent id fails with `NotFound`
    async fn delete(&self, id: TemplateId) -> Result<()>;
}
