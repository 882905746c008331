use axum::extract::{rejection::PathRejection, Path, State};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResult, IntoApiResponse};
use crate::models::Todo;
use crate::router::TodoRouter;

/// Path rejections (bad percent-encoding, invalid UTF-8) surface as the
/// usual JSON error instead of axum's plain-text 400.
fn record_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::malformed(format!("invalid todo path: {}", e.body_text())))
}

/// GET {prefix}/todo/:id - fetch a single todo
pub async fn get(
    State(router): State<TodoRouter>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Todo> {
    let id = record_id(path)?;
    let todo = router.persistence().get(&id).await?;
    Ok(todo.into_api_response())
}

/// DELETE {prefix}/todo/:id - remove a single todo
pub async fn delete(
    State(router): State<TodoRouter>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Value> {
    let id = record_id(path)?;
    router.persistence().delete(&id).await?;
    Ok(json!({ "id": id }).into_api_response())
}
