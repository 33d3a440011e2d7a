pub mod extraction;
pub mod geometry;
pub mod ocr;
pub mod template;

pub use extraction::{ExtractionResult, FieldValues, Warning, WarningKind};
pub use geometry::{ImageSize, PixelBox, Point, RelativeBox};
pub use ocr::{OcrPage, OcrRegion, OcrResult};
pub use template::{Field, FieldType, Language, NewTemplate, Template, TemplateId, TemplateUpdate};
