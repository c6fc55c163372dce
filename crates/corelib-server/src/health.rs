use axum::Json;
use corelib_model::SuccessResponse;

/// Health check handler
pub async fn health_handler() -> Json<SuccessResponse<()>> {
    Json(SuccessResponse::success("200", "UP", None))
}
