use axum::Json;

use crate::qa::registry::{all_models, ModelConfig};

/// GET /api/models - the selectable models and their inference parameters.
pub async fn list_models() -> Json<&'static [ModelConfig]> {
    Json(all_models())
}
