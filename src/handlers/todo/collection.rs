use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension, State},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResult, AuthUser, IntoApiResponse};
use crate::models::Todo;
use crate::router::TodoRouter;

/// POST {prefix}/todo - store a new todo owned by the caller
///
/// The body is decoded as JSON whatever its content type. Any `user_id`
/// in it is replaced with the authenticated user. A body that cannot be
/// read (over the size limit, aborted) is reported like any other failure.
pub async fn post(
    State(router): State<TodoRouter>,
    Extension(user): Extension<AuthUser>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Value> {
    let body = body.map_err(|e| ApiError::malformed(format!("unreadable todo body: {}", e.body_text())))?;
    let mut todo: Todo = serde_json::from_slice(&body)
        .map_err(|e| ApiError::malformed(format!("invalid todo body: {}", e)))?;
    todo.user_id = user.id;

    let id = router.persistence().create(todo).await?;
    Ok(json!({ "id": id }).into_api_response())
}

/// GET {prefix}/todo - list all todos
pub async fn get(State(router): State<TodoRouter>) -> ApiResult<Vec<Todo>> {
    let todos = router.persistence().list().await?;
    Ok(todos.into_api_response())
}
