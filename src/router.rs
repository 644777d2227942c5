//! Request dispatch and the JSON response envelope.
//!
//! [`Router::dispatch`] is the single failure boundary of the API: every
//! error raised while routing or handling a request is turned into an
//! `{"error": message}` envelope here, with the status the error maps to.

use crate::{
    config::Tables,
    error::Error,
    resource::{Item, ResourceHandler, User},
    route::{ResourceKind, Route},
    store::Store,
};

use axum::{
    body::Bytes,
    http::{Method, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// An inbound request, detached from any transport.
#[derive(Clone, Debug)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path, without query string.
    pub path: String,
    /// Raw body. Empty when the request carried none.
    pub body: Bytes,
}

impl Request {
    /// Request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Bytes::new(),
        }
    }

    /// Attach a JSON body.
    pub fn with_json(mut self, body: &Value) -> Self {
        self.body = Bytes::from(body.to_string());
        self
    }
}

/// Status and JSON body of a response.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    /// HTTP status.
    pub status: StatusCode,
    /// JSON body.
    pub body: Value,
}

impl Reply {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn error(error: &Error) -> Self {
        Self {
            status: error.status(),
            body: json!({ "error": error.to_string() }),
        }
    }
}

/// Dispatches requests to the resource handlers.
///
/// Holds the store shared by every request and the table of each resource.
#[derive(Debug)]
pub struct Router<S> {
    store: Arc<S>,
    tables: Tables,
}

impl<S> Clone for Router<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tables: self.tables.clone(),
        }
    }
}

impl<S: Store> Router<S> {
    /// Router over `store` with the given table names.
    pub fn new(store: Arc<S>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// Resolve, handle and wrap one request. Never fails.
    pub async fn dispatch(&self, request: Request) -> Reply {
        tracing::info!(method = %request.method, path = %request.path, "request received");
        let reply = match self.try_dispatch(&request).await {
            Ok(body) => Reply::ok(body),
            Err(error) => {
                if error.status().is_server_error() {
                    tracing::error!(
                        method = %request.method,
                        path = %request.path,
                        error = %error,
                        "request failed"
                    );
                } else {
                    tracing::debug!(
                        method = %request.method,
                        path = %request.path,
                        error = %error,
                        "request rejected"
                    );
                }
                Reply::error(&error)
            }
        };
        tracing::info!(status = reply.status.as_u16(), "request completed");
        reply
    }

    async fn try_dispatch(&self, request: &Request) -> Result<Value, Error> {
        let route = Route::resolve(&request.method, &request.path)?;
        let store = self.store.as_ref();
        match route.resource {
            ResourceKind::Items => {
                ResourceHandler::<Item, S>::new(store, &self.tables.items)
                    .handle(route.action, &request.body)
                    .await
            }
            ResourceKind::Users => {
                ResourceHandler::<User, S>::new(store, &self.tables.users)
                    .handle(route.action, &request.body)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn router() -> Router<MemoryStore> {
        let store = MemoryStore::new()
            .with_table("items-table", "itemId")
            .with_table("users-table", "userId");
        Router::new(
            Arc::new(store),
            Tables {
                items: "items-table".to_string(),
                users: "users-table".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let reply = router().dispatch(Request::new(Method::GET, "/widgets")).await;
        assert_eq!(
            reply,
            Reply {
                status: StatusCode::NOT_FOUND,
                body: json!({"error": "route not found"}),
            }
        );
    }

    #[tokio::test]
    async fn delete_without_id_is_bad_request() {
        let reply = router().dispatch(Request::new(Method::DELETE, "/items")).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body, json!({"error": "missing id in URL"}));
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let reply = router().dispatch(Request::new(Method::HEAD, "/users")).await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            reply.body,
            json!({"error": "method not supported for /users"})
        );
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let reply = router().dispatch(Request::new(Method::GET, "/users/nobody")).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body, json!({"error": "user not found"}));
    }

    #[tokio::test]
    async fn resources_use_their_own_tables() {
        let router = router();
        let created = router
            .dispatch(
                Request::new(Method::POST, "/users").with_json(&json!({"userId": "u1", "name": "Ada"})),
            )
            .await;
        assert_eq!(created, Reply::ok(json!({"message": "user created"})));

        let users = router.dispatch(Request::new(Method::GET, "/users")).await;
        let items = router.dispatch(Request::new(Method::GET, "/items")).await;
        assert_eq!(users.body, json!([{"userId": "u1", "name": "Ada"}]));
        assert_eq!(items.body, json!([]));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let mut request = Request::new(Method::POST, "/items");
        request.body = Bytes::from_static(b"{not json");
        let reply = router().dispatch(request).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_errors_are_server_errors() {
        let router = Router::new(
            Arc::new(MemoryStore::new()),
            Tables {
                items: "missing".to_string(),
                users: "missing".to_string(),
            },
        );
        let reply = router.dispatch(Request::new(Method::GET, "/items")).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            reply.body,
            json!({"error": "requested table not found: missing"})
        );
    }
}
