//! Ordered, validated field storage for one template draft.

use crate::error::{FormscanError, Result};
use crate::models::Field;

/// Case-insensitive field name comparison
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Fields of a template draft, in insertion order.
///
/// Every mutation either succeeds completely or leaves the registry as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRegistry {
    fields: Vec<Field>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field after checking its name and geometry
    pub fn add(&mut self, mut field: Field) -> Result<()> {
        let name = field.name.trim();
        if name.is_empty() {
            return Err(FormscanError::validation("Field name must not be empty"));
        }

        if self.fields.iter().any(|existing| names_match(&existing.name, name)) {
            return Err(FormscanError::validation(format!(
                "A field named '{}' already exists",
                name
            )));
        }

        field.bounds().validate()?;

        field.name = name.to_string();
        self.fields.push(field);
        Ok(())
    }

    /// Remove a field by name, returning it
    pub fn remove(&mut self, name: &str) -> Result<Field> {
        let index = self
            .fields
            .iter()
            .position(|f| names_match(&f.name, name))
            .ok_or_else(|| FormscanError::not_found(format!("field '{}'", name)))?;
        Ok(self.fields.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| names_match(&f.name, name))
    }

    pub fn list(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Field list in its serialized form
    pub fn to_persisted(&self) -> Vec<Field> {
        self.fields.clone()
    }

    /// Rebuild a registry from a stored field list, validating each entry
    pub fn from_persisted(fields: Vec<Field>) -> Result<Self> {
        let mut registry = Self { fields: Vec::with_capacity(fields.len()) };
        for field in fields {
            registry.add(field)?;
        }
        Ok(registry)
    }
}
