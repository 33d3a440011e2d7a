//! One template draft being authored.

use formscan_core::config::LayeredConfig;
use formscan_core::error::{FormscanError, Result};
use formscan_core::models::{Field, FieldType, ImageSize, Language, NewTemplate, Point, Template};
use formscan_core::FieldRegistry;
use formscan_store::TemplateStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::selection::SelectionController;
use crate::viewport::Viewport;

/// Reference image the user draws on
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceImage {
    /// URI or data URL, stored with the template as-is
    pub uri: String,
    /// Size of the image at zoom 1, in the pixel space pointers map into
    pub layout: ImageSize,
}

/// Authoring state for one template draft: metadata, viewport, the live
/// selection and the confirmed fields.
#[derive(Debug)]
pub struct AuthoringSession {
    name: String,
    language: Language,
    description: Option<String>,
    reference_image: Option<ReferenceImage>,
    viewport: Viewport,
    selection: SelectionController,
    registry: FieldRegistry,
    saving: Arc<AtomicBool>,
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl AuthoringSession {
    pub fn new(language: Language) -> Self {
        Self {
            name: String::new(),
            language,
            description: None,
            reference_image: None,
            viewport: Viewport::default(),
            selection: SelectionController::default(),
            registry: FieldRegistry::new(),
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Session using the configured default language and selection threshold
    pub fn from_config(config: &LayeredConfig) -> Self {
        let mut session = Self::new(config.default_language.value);
        session.selection = SelectionController::new(config.min_selection_pixels.value);
        session
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.trim().is_empty());
    }

    pub fn reference_image(&self) -> Option<&ReferenceImage> {
        self.reference_image.as_ref()
    }

    /// Load the image to draw on. Any selection on the previous image is dropped.
    pub fn load_reference_image(&mut self, uri: impl Into<String>, layout: ImageSize) -> Result<()> {
        layout.validate()?;
        self.reference_image = Some(ReferenceImage { uri: uri.into(), layout });
        self.selection.cancel();
        Ok(())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn fields(&self) -> &[Field] {
        self.registry.list()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Start a drag at a raw pointer position
    pub fn pointer_down(&mut self, pointer: Point) -> Result<()> {
        if self.reference_image.is_none() {
            return Err(FormscanError::validation("Load a reference image before drawing"));
        }
        let point = self.viewport.to_image(pointer)?;
        self.selection.pointer_down(point, self.viewport.zoom())
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Result<()> {
        let point = self.viewport.to_image(pointer)?;
        self.selection.pointer_move(point);
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        self.selection.pointer_up();
    }

    pub fn cancel_selection(&mut self) {
        self.selection.cancel();
    }

    /// Name the pending selection as a text field
    pub fn confirm_field(&mut self, name: &str) -> Result<Field> {
        self.confirm_typed_field(name, FieldType::Text)
    }

    pub fn confirm_typed_field(&mut self, name: &str, kind: FieldType) -> Result<Field> {
        let layout = self
            .reference_image
            .as_ref()
            .map(|image| image.layout)
            .ok_or_else(|| FormscanError::validation("Load a reference image before drawing"))?;

        self.selection.confirm_field(name, kind, layout, &mut self.registry)
    }

    pub fn remove_field(&mut self, name: &str) -> Result<Field> {
        self.registry.remove(name)
    }

    /// Snapshot the draft into a creation request and claim the save slot.
    ///
    /// Fails with `SaveInProgress` while another `PendingSave` from this
    /// session is alive. The slot is released when the returned value is
    /// dropped, whether or not it was submitted.
    pub fn begin_save(&self) -> Result<PendingSave> {
        if self
            .saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FormscanError::SaveInProgress);
        }
        let guard = SaveGuard(Arc::clone(&self.saving));

        let mut request = NewTemplate::new(self.name.clone(), self.language, self.registry.to_persisted());
        if let Some(image) = &self.reference_image {
            request = request.reference_image(image.uri.clone());
        }
        request.description = self.description.clone();

        Ok(PendingSave { request: request.validated()?, _guard: guard })
    }

    /// Persist the draft and, on success, start a fresh one.
    ///
    /// Fields, selection, name, description, image and zoom are reset; the
    /// language is kept. On failure the draft is left untouched.
    pub async fn save(&mut self, store: &dyn TemplateStore) -> Result<Template> {
        let pending = self.begin_save()?;
        let template = pending.submit(store).await?;

        tracing::info!(id = %template.id, name = %template.name, fields = template.fields.len(), "Template saved");
        self.reset();
        Ok(template)
    }

    /// Discard the draft, keeping the language
    pub fn reset(&mut self) {
        self.name.clear();
        self.description = None;
        self.reference_image = None;
        self.selection.cancel();
        self.registry.clear();
        self.viewport.reset_zoom();
    }
}

/// Validated creation request holding the session's save slot
#[derive(Debug)]
pub struct PendingSave {
    request: NewTemplate,
    _guard: SaveGuard,
}

impl PendingSave {
    pub fn request(&self) -> &NewTemplate {
        &self.request
    }

    /// Send the request to `store`; the save slot is released afterwards
    pub async fn submit(self, store: &dyn TemplateStore) -> Result<Template> {
        tracing::debug!(name = %self.request.name, fields = self.request.fields.len(), "Submitting template");
        let result = store.create(self.request).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Template save failed");
        }
        result
    }
}

#[derive(Debug)]
struct SaveGuard(Arc<AtomicBool>);

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use formscan_core::models::{RelativeBox, TemplateId, TemplateUpdate};
    use formscan_store::MemoryTemplateStore;

    const PAGE: ImageSize = ImageSize { width: 1000.0, height: 1400.0 };

    /// Store whose every call fails
    struct OfflineStore;

    #[async_trait]
    impl TemplateStore for OfflineStore {
        async fn create(&self, _template: NewTemplate) -> Result<Template> {
            Err(FormscanError::Storage("offline".to_string()))
        }
        async fn list(&self) -> Result<Vec<Template>> {
            Err(FormscanError::Storage("offline".to_string()))
        }
        async fn get(&self, id: TemplateId) -> Result<Template> {
            Err(FormscanError::not_found(id))
        }
        async fn update(&self, id: TemplateId, _update: TemplateUpdate) -> Result<Template> {
            Err(FormscanError::not_found(id))
        }
        async fn delete(&self, id: TemplateId) -> Result<()> {
            Err(FormscanError::not_found(id))
        }
    }

    fn draw(session: &mut AuthoringSession, from: Point, to: Point, name: &str) -> Result<Field> {
        session.pointer_down(from)?;
        session.pointer_move(to)?;
        session.pointer_up();
        session.confirm_field(name)
    }

    fn ready_session() -> AuthoringSession {
        let mut session = AuthoringSession::new(Language::Eng);
        session.set_name("Energy bill");
        session.load_reference_image("file:///bill.png", PAGE).unwrap();
        draw(&mut session, Point::new(700.0, 70.0), Point::new(900.0, 140.0), "invoice_total")
            .unwrap();
        session
    }

    #[test]
    fn test_drawing_requires_reference_image() {
        let mut session = AuthoringSession::default();
        let err = session.pointer_down(Point::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));
    }

    #[test]
    fn test_same_rectangle_at_different_zoom_gives_same_field() {
        let mut session = AuthoringSession::default();
        session.load_reference_image("file:///bill.png", PAGE).unwrap();
        session.viewport_mut().set_origin(Point::new(30.0, 80.0));

        let at_one = draw(&mut session, Point::new(730.0, 150.0), Point::new(930.0, 220.0), "a")
            .unwrap();

        session.viewport_mut().set_zoom(2.0);
        let at_two = draw(&mut session, Point::new(1430.0, 220.0), Point::new(1830.0, 360.0), "b")
            .unwrap();

        let (a, b) = (at_one.bounds(), at_two.bounds());
        assert!((a.x - b.x).abs() < 1e-9);
        assert!((a.y - b.y).abs() < 1e-9);
        assert!((a.width - b.width).abs() < 1e-9);
        assert!((a.height - b.height).abs() < 1e-9);
        assert!((a.x - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_second_begin_save_is_rejected_while_pending() {
        let session = ready_session();

        let pending = session.begin_save().unwrap();
        assert!(session.is_saving());
        assert!(matches!(session.begin_save().unwrap_err(), FormscanError::SaveInProgress));

        drop(pending);
        assert!(!session.is_saving());
        assert!(session.begin_save().is_ok());
    }

    #[test]
    fn test_begin_save_validates_draft() {
        let mut session = AuthoringSession::default();
        session.set_name("No fields yet");
        let err = session.begin_save().unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));
        assert!(!session.is_saving());

        let mut session = ready_session();
        session.set_name("   ");
        assert!(matches!(session.begin_save().unwrap_err(), FormscanError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_save_persists_and_resets_draft() {
        let store = MemoryTemplateStore::new();
        let mut session = ready_session();
        session.set_description(Some("Monthly electricity".to_string()));
        session.viewport_mut().zoom_in();

        let template = session.save(&store).await.unwrap();
        assert_eq!(template.name, "Energy bill");
        assert_eq!(template.language, Language::Eng);
        assert_eq!(template.reference_image, "file:///bill.png");
        assert_eq!(template.fields[0].bounds(), RelativeBox::new(0.7, 0.05, 0.2, 0.05));

        assert!(session.fields().is_empty());
        assert_eq!(session.name(), "");
        assert_eq!(session.viewport().zoom(), 1.0);
        assert_eq!(session.language(), Language::Eng);
        assert!(!session.is_saving());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let mut session = ready_session();

        let err = session.save(&OfflineStore).await.unwrap_err();
        assert!(matches!(err, FormscanError::Storage(_)));
        assert_eq!(session.fields().len(), 1);
        assert_eq!(session.name(), "Energy bill");
        assert!(!session.is_saving());
    }

    #[test]
    fn test_remove_field() {
        let mut session = ready_session();
        session.remove_field("INVOICE_TOTAL").unwrap();
        assert!(session.fields().is_empty());
        assert!(matches!(
            session.remove_field("invoice_total").unwrap_err(),
            FormscanError::NotFound { .. }
        ));
    }
}
