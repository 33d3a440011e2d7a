//! FormScan Authoring - Interactive template drawing
//!
//! Pointer events come in, validated fields go out. Nothing here renders;
//! a UI feeds raw pointer positions to an `AuthoringSession` and reads back
//! the draft rectangle and the field list.

pub mod selection;
pub mod session;
pub mod viewport;

pub use selection::{SelectionController, SelectionDraft, SelectionState};
pub use session::{AuthoringSession, PendingSave, ReferenceImage};
pub use viewport::Viewport;
