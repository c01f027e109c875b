use axum::Json;
use axum::extract::Path;

use practica_forms::render::{ComponentDescriptor, catalog, component_for_tag};

/// Palette of supported question types.
pub async fn list_question_types() -> Json<Vec<ComponentDescriptor>> {
    Json(catalog())
}

/// Render dispatch for a single tag. Unknown tags get the unsupported
/// fallback with `supported: false`.
pub async fn get_question_type(Path(tag): Path<String>) -> Json<ComponentDescriptor> {
    Json(component_for_tag(&tag))
}
