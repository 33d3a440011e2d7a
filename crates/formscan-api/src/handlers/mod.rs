mod extract;
mod health;
mod templates;

pub use extract::extract_fields;
pub use health::health_check;
pub use templates::{create_template, delete_template, get_template, list_templates, update_template};
