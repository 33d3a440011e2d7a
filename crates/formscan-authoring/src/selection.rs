//! Rectangle drawing state machine.
//!
//! All points handed to the controller are already in image pixels; the
//! `Viewport` takes care of pointer offsets and zoom.

use formscan_core::config::DEFAULT_MIN_SELECTION_PIXELS;
use formscan_core::error::{FormscanError, Result};
use formscan_core::models::{Field, FieldType, ImageSize, PixelBox, Point};
use formscan_core::FieldRegistry;
use formscan_geo::normalize::pixels_to_relative;
use formscan_geo::spatial::clamp_to;

/// A finished rectangle waiting for a field name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionDraft {
    pub anchor: Point,
    pub rect: PixelBox,
    /// Zoom in effect when the rectangle was sampled
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Drawing(SelectionDraft),
    Committed(SelectionDraft),
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    min_selection_pixels: f64,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SELECTION_PIXELS)
    }
}

impl SelectionController {
    pub fn new(min_selection_pixels: f64) -> Self {
        Self { state: SelectionState::Idle, min_selection_pixels }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn min_selection_pixels(&self) -> f64 {
        self.min_selection_pixels
    }

    /// Rectangle being drawn or awaiting confirmation
    pub fn current_rect(&self) -> Option<PixelBox> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Drawing(draft) | SelectionState::Committed(draft) => Some(draft.rect),
        }
    }

    pub fn draft(&self) -> Option<&SelectionDraft> {
        match &self.state {
            SelectionState::Committed(draft) => Some(draft),
            _ => None,
        }
    }

    /// Start a drag. A pending draft must be confirmed or cancelled first.
    pub fn pointer_down(&mut self, point: Point, zoom: f64) -> Result<()> {
        if let SelectionState::Committed(_) = self.state {
            return Err(FormscanError::validation(
                "A selection is pending; confirm or cancel it before drawing another",
            ));
        }
        if !point.is_finite() {
            return Err(FormscanError::geometry("pointer position must be finite"));
        }

        // A down while already drawing means the up was lost; restart the drag
        self.state = SelectionState::Drawing(SelectionDraft {
            anchor: point,
            rect: PixelBox::at(point),
            zoom,
        });
        Ok(())
    }

    /// Stretch the rectangle to `point`. Ignored unless drawing.
    pub fn pointer_move(&mut self, point: Point) {
        if let SelectionState::Drawing(draft) = &mut self.state {
            if point.is_finite() {
                draft.rect = PixelBox::from_corners(draft.anchor, point);
            }
        }
    }

    /// Freeze the rectangle as the draft. Ignored unless drawing.
    pub fn pointer_up(&mut self) {
        if let SelectionState::Drawing(draft) = self.state {
            self.state = SelectionState::Committed(draft);
        }
    }

    /// Drop the draft or the drag in progress
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Turn the committed draft into a field and add it to `registry`.
    ///
    /// `layout` is the size of the reference image in the same pixel space
    /// as the draft. On error the draft stays committed so the caller can
    /// retry with a corrected name.
    pub fn confirm_field(
        &mut self,
        name: &str,
        kind: FieldType,
        layout: ImageSize,
        registry: &mut FieldRegistry,
    ) -> Result<Field> {
        let draft = match self.state {
            SelectionState::Committed(draft) => draft,
            _ => return Err(FormscanError::validation("There is no selection to confirm")),
        };

        if name.trim().is_empty() {
            return Err(FormscanError::validation("Field name must not be empty"));
        }

        layout.validate()?;
        let inside = clamp_to(&draft.rect, &layout.bounds());

        // Measured after clipping, so a drag mostly off the image counts as small
        let min = self.min_selection_pixels;
        if !(inside.width > min && inside.height > min) {
            return Err(FormscanError::geometry(format!(
                "selection of {:.1}x{:.1} px inside the image is too small; both sides must exceed {} px",
                inside.width, inside.height, min
            )));
        }

        let bounds = pixels_to_relative(&inside, layout)?;

        registry.add(Field::new(name, bounds).with_kind(kind))?;

        self.state = SelectionState::Idle;
        registry
            .get(name)
            .cloned()
            .ok_or_else(|| FormscanError::not_found(format!("field '{}'", name.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formscan_core::models::RelativeBox;

    const LAYOUT: ImageSize = ImageSize { width: 1000.0, height: 1400.0 };

    fn committed(from: Point, to: Point) -> SelectionController {
        let mut controller = SelectionController::default();
        controller.pointer_down(from, 1.0).unwrap();
        controller.pointer_move(to);
        controller.pointer_up();
        controller
    }

    #[test]
    fn test_pointer_down_starts_zero_size_rect() {
        let mut controller = SelectionController::default();
        controller.pointer_down(Point::new(10.0, 20.0), 1.5).unwrap();

        match controller.state() {
            SelectionState::Drawing(draft) => {
                assert_eq!(draft.rect, PixelBox::new(10.0, 20.0, 0.0, 0.0));
                assert_eq!(draft.zoom, 1.5);
            }
            other => panic!("expected drawing, got {:?}", other),
        }
    }

    #[test]
    fn test_drag_in_any_direction_yields_positive_rect() {
        let anchor = Point::new(100.0, 100.0);
        for corner in [
            Point::new(150.0, 130.0),
            Point::new(50.0, 130.0),
            Point::new(150.0, 70.0),
            Point::new(50.0, 70.0),
        ] {
            let controller = committed(anchor, corner);
            let rect = controller.draft().unwrap().rect;
            assert_eq!(rect.width, 50.0);
            assert_eq!(rect.height, 30.0);
            assert_eq!(rect.x, anchor.x.min(corner.x));
            assert_eq!(rect.y, anchor.y.min(corner.y));
        }
    }

    #[test]
    fn test_events_in_idle_are_ignored() {
        let mut controller = SelectionController::default();
        controller.pointer_move(Point::new(5.0, 5.0));
        controller.pointer_up();
        controller.cancel();
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut controller = committed(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        controller.cancel();
        assert_eq!(controller.state(), &SelectionState::Idle);

        let mut controller = SelectionController::default();
        controller.pointer_down(Point::new(0.0, 0.0), 1.0).unwrap();
        controller.cancel();
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_pointer_down_while_committed_is_rejected() {
        let mut controller = committed(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        let before = *controller.state();

        let err = controller.pointer_down(Point::new(200.0, 200.0), 1.0).unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_confirm_adds_relative_field() {
        let mut controller = committed(Point::new(700.0, 70.0), Point::new(900.0, 140.0));
        let mut registry = FieldRegistry::new();

        let field = controller
            .confirm_field("invoice_total", FieldType::Number, LAYOUT, &mut registry)
            .unwrap();

        assert_eq!(field.bounds(), RelativeBox::new(0.7, 0.05, 0.2, 0.05));
        assert_eq!(field.kind, FieldType::Number);
        assert_eq!(registry.len(), 1);
        assert_eq!(controller.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_confirm_with_empty_name_keeps_draft() {
        let mut controller = committed(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        let mut registry = FieldRegistry::new();

        let err = controller.confirm_field("  ", FieldType::Text, LAYOUT, &mut registry).unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));
        assert!(controller.draft().is_some());
        assert!(registry.is_empty());

        controller.confirm_field("total", FieldType::Text, LAYOUT, &mut registry).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_small_selection_is_a_geometry_error() {
        let mut registry = FieldRegistry::new();

        // 5 px is not enough; both sides must exceed the threshold
        let mut controller = committed(Point::new(10.0, 10.0), Point::new(15.0, 60.0));
        let err = controller.confirm_field("a", FieldType::Text, LAYOUT, &mut registry).unwrap_err();
        assert!(matches!(err, FormscanError::Geometry { .. }));
        assert!(controller.draft().is_some());

        let mut controller = committed(Point::new(10.0, 10.0), Point::new(16.0, 16.0));
        controller.confirm_field("a", FieldType::Text, LAYOUT, &mut registry).unwrap();
    }

    #[test]
    fn test_duplicate_name_keeps_draft() {
        let mut registry = FieldRegistry::new();
        let mut first = committed(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        first.confirm_field("Total", FieldType::Text, LAYOUT, &mut registry).unwrap();

        let mut second = committed(Point::new(100.0, 100.0), Point::new(150.0, 150.0));
        let err = second.confirm_field("total", FieldType::Text, LAYOUT, &mut registry).unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));
        assert!(second.draft().is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_selection_past_image_edge_is_clipped() {
        let mut controller = committed(Point::new(900.0, 1300.0), Point::new(1200.0, 1500.0));
        let mut registry = FieldRegistry::new();

        let field = controller.confirm_field("corner", FieldType::Text, LAYOUT, &mut registry).unwrap();
        assert!((field.x + field.width - 1.0).abs() < 1e-9);
        assert!((field.y + field.height - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_selection_mostly_off_image_is_too_small() {
        // 102 px wide drag, but only 2 px of it lands on the image
        let mut controller = committed(Point::new(998.0, 100.0), Point::new(1100.0, 200.0));
        let mut registry = FieldRegistry::new();

        let err = controller.confirm_field("sliver", FieldType::Text, LAYOUT, &mut registry).unwrap_err();
        assert!(matches!(err, FormscanError::Geometry { .. }));
        assert!(controller.draft().is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_confirm_without_draft() {
        let mut controller = SelectionController::default();
        let mut registry = FieldRegistry::new();
        let err = controller.confirm_field("a", FieldType::Text, LAYOUT, &mut registry).unwrap_err();
        assert!(matches!(err, FormscanError::Validation { .. }));
    }
}
