use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::router::TodoRouter;

/// Authenticated caller, inserted into request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

/// Authenticates every request, matched route or not, before it is
/// dispatched. Unauthenticated requests never reach a handler.
pub async fn basic_auth_middleware(
    State(router): State<TodoRouter>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = router.authentication().authenticate(request.headers())?;

    tracing::info!(
        "request from [{}]: {} {}",
        user_id,
        request.method(),
        request.uri()
    );

    request.extensions_mut().insert(AuthUser { id: user_id });
    Ok(next.run(request).await)
}
