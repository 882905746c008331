use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::Authentication;
use crate::config::normalize_prefix;
use crate::handlers;
use crate::middleware::basic_auth_middleware;
use crate::persistence::Persistence;

/// Request router for the todo API.
///
/// Holds no per-request state: cloning it only clones the prefix and two
/// `Arc`s, and it doubles as the axum state for every handler.
#[derive(Clone)]
pub struct TodoRouter {
    prefix: String,
    authentication: Arc<dyn Authentication>,
    persistence: Arc<dyn Persistence>,
}

impl TodoRouter {
    pub fn new(
        prefix: &str,
        authentication: Arc<dyn Authentication>,
        persistence: Arc<dyn Persistence>,
    ) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            authentication,
            persistence,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn authentication(&self) -> &dyn Authentication {
        self.authentication.as_ref()
    }

    pub fn persistence(&self) -> &dyn Persistence {
        self.persistence.as_ref()
    }

    /// `{prefix}/todo`
    pub fn collection_path(&self) -> String {
        format!("{}/todo", self.prefix)
    }

    /// Build the axum application. Authentication wraps the fallback as
    /// well, so an unauthenticated request to an unknown path gets 403.
    pub fn into_router(self) -> Router {
        let collection = self.collection_path();
        let record = format!("{}/:id", collection);

        Router::new()
            .route(
                &collection,
                get(handlers::collection_get)
                    .post(handlers::collection_post)
                    .fallback(handlers::not_found),
            )
            .route(
                &record,
                get(handlers::record_get)
                    .delete(handlers::record_delete)
                    .fallback(handlers::not_found),
            )
            .fallback(handlers::not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(from_fn_with_state(self.clone(), basic_auth_middleware)),
            )
            .with_state(self)
    }
}
