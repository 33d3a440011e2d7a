//! In-memory template store for development, tests and the default API backend.

use async_trait::async_trait;
use chrono::Utc;
use formscan_core::error::{FormscanError, Result};
use formscan_core::models::{NewTemplate, Template, TemplateId, TemplateUpdate};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ports::TemplateStore;

/// In-memory implementation of TemplateStore
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    templates: Arc<RwLock<HashMap<TemplateId, Template>>>,
}

impl MemoryTemplateStore {
    /// Create a new, empty in-memory template store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored templates
    pub fn len(&self) -> usize {
        self.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<TemplateId, Template>>> {
        self.templates
            .read()
            .map_err(|_| FormscanError::Storage("template map lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<TemplateId, Template>>> {
        self.templates
            .write()
            .map_err(|_| FormscanError::Storage("template map lock poisoned".to_string()))
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn create(&self, template: NewTemplate) -> Result<Template> {
        let template = Template::from_new(template, TemplateId::new(), Utc::now())?;

        let mut templates = self.write()?;
        templates.insert(template.id, template.clone());

        tracing::debug!(id = %template.id, name = %template.name, fields = template.fields.len(), "Stored template");
        Ok(template)
    }

    async fn list(&self) -> Result<Vec<Template>> {
        let templates = self.read()?;
        Ok(templates.values().cloned().collect())
    }

    async fn get(&self, id: TemplateId) -> Result<Template> {
        let templates = self.read()?;
        templates.get(&id).cloned().ok_or_else(|| FormscanError::not_found(id))
    }

    async fn update(&self, id: TemplateId, update: TemplateUpdate) -> Result<Template> {
        let mut templates = self.write()?;
        let template = templates.get_mut(&id).ok_or_else(|| FormscanError::not_found(id))?;

        update.apply_to(template, Utc::now())?;

        tracing::debug!(id = %id, "Updated template");
        Ok(template.clone())
    }

    async fn delete(&self, id: TemplateId) -> Result<()> {
        let mut templates = self.write()?;
        templates.remove(&id).ok_or_else(|| FormscanError::not_found(id))?;

        tracing::debug!(id = %id, "Deleted template");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formscan_core::models::{Field, Language, RelativeBox};

    fn new_template(name: &str) -> NewTemplate {
        NewTemplate::new(
            name,
            Language::Por,
            vec![Field::new("invoice_total", RelativeBox::new(0.70, 0.05, 0.20, 0.05))],
        )
        .reference_image("file:///templates/bill.png")
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = MemoryTemplateStore::new();
        let template = store.create(new_template("Energy bill")).await.unwrap();

        assert_eq!(template.name, "Energy bill");
        assert_eq!(template.created_at, template.updated_at);
        assert_eq!(store.get(template.id).await.unwrap(), template);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_template() {
        let store = MemoryTemplateStore::new();

        let err = store.create(NewTemplate::new("Bill", Language::Por, vec![])).await.unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));

        let err = store.create(new_template("")).await.unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_field_geometry() {
        let store = MemoryTemplateStore::new();
        let request = NewTemplate::new(
            "Bill",
            Language::Por,
            vec![Field::new("total", RelativeBox::new(0.9, 0.1, 0.2, 0.1))],
        );

        let err = store.create(request).await.unwrap_err();
        assert!(matches!(err, FormscanError::Geometry { .. }));
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = MemoryTemplateStore::new();
        let err = store.get(TemplateId::new()).await.unwrap_err();
        assert!(matches!(err, FormscanError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_updated_at() {
        let store = MemoryTemplateStore::new();
        let created = store.create(new_template("Bill")).await.unwrap();

        let updated = store
            .update(
                created.id,
                TemplateUpdate { name: Some("Water bill".to_string()), ..Default::default() },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Water bill");
        assert_eq!(updated.reference_image, created.reference_image);
        assert_eq!(updated.fields, created.fields);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryTemplateStore::new();
        let err = store.update(TemplateId::new(), TemplateUpdate::default()).await.unwrap_err();
        assert!(matches!(err, FormscanError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_returns_all_templates() {
        let store = MemoryTemplateStore::new();
        store.create(new_template("b")).await.unwrap();
        store.create(new_template("a")).await.unwrap();

        let mut names: Vec<_> = store.list().await.unwrap().into_iter().map(|t| t.name).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }
}
