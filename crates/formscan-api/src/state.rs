use formscan_extract::MapperOptions;
use formscan_store::TemplateStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TemplateStore>,

    /// Mapper settings; the page is chosen per request
    pub mapper_options: MapperOptions,
}

impl AppState {
    pub fn new(store: Arc<dyn TemplateStore>, mapper_options: MapperOptions) -> Self {
        Self { store, mapper_options }
    }
}
