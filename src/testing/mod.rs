use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::auth::{basic_credentials, basic_header_value, AuthError, Authentication};
use crate::models::Todo;
use crate::persistence::{stamp_new, Persistence, PersistenceError};

/// In-memory todo store for router tests
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    todos: Mutex<BTreeMap<String, Todo>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let todos = todos.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self {
            todos: Mutex::new(todos),
        }
    }

    /// Snapshot of a stored record, bypassing the trait
    pub fn stored(&self, id: &str) -> Option<Todo> {
        self.todos.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn create(&self, todo: Todo) -> Result<String, PersistenceError> {
        let todo = stamp_new(todo);
        let id = todo.id.clone();
        self.todos.lock().unwrap().insert(id.clone(), todo);
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        self.todos
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))
    }

    async fn get(&self, id: &str) -> Result<Todo, PersistenceError> {
        self.todos
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<Todo>, PersistenceError> {
        Ok(self.todos.lock().unwrap().values().cloned().collect())
    }
}

/// Store whose every operation fails with an I/O error
#[derive(Debug, Default)]
pub struct BrokenPersistence;

#[async_trait]
impl Persistence for BrokenPersistence {
    async fn create(&self, _todo: Todo) -> Result<String, PersistenceError> {
        Err(std::io::Error::other("disk on fire").into())
    }

    async fn delete(&self, _id: &str) -> Result<(), PersistenceError> {
        Err(std::io::Error::other("disk on fire").into())
    }

    async fn get(&self, _id: &str) -> Result<Todo, PersistenceError> {
        Err(std::io::Error::other("disk on fire").into())
    }

    async fn list(&self) -> Result<Vec<Todo>, PersistenceError> {
        Err(std::io::Error::other("disk on fire").into())
    }
}

/// Name → password map; the user name doubles as the user id.
#[derive(Debug, Default)]
pub struct StaticAuthentication {
    credentials: HashMap<String, String>,
}

impl StaticAuthentication {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            credentials: pairs
                .iter()
                .map(|(name, pass)| (name.to_string(), pass.to_string()))
                .collect(),
        }
    }
}

impl Authentication for StaticAuthentication {
    fn authenticate(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        let (name, password) = basic_credentials(headers)?;
        match self.credentials.get(&name) {
            Some(known) if *known == password => Ok(name),
            _ => Err(AuthError::NotPermitted),
        }
    }
}

/// Build a request, optionally carrying basic credentials and a body.
pub fn request(
    method: Method,
    uri: &str,
    credentials: Option<(&str, &str)>,
    body: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((name, password)) = credentials {
        builder = builder.header(header::AUTHORIZATION, basic_header_value(name, password));
    }
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    builder.body(body).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_persistence_follows_store_contract() {
        let store = MemoryPersistence::new();

        let id = store.create(Todo::new("t", "d")).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(store.get(&id).await.unwrap().title, "t");
        assert_eq!(store.list().await.unwrap().len(), 1);

        store.delete(&id).await.unwrap();
        assert!(matches!(
            store.delete(&id).await,
            Err(PersistenceError::NotFound(_))
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[test]
    fn static_authentication_uses_name_as_id() {
        let auth = StaticAuthentication::new(&[("the-user", "the-pass")]);
        let req = request(Method::GET, "/", Some(("the-user", "the-pass")), None);
        assert_eq!(auth.authenticate(req.headers()).unwrap(), "the-user");

        let req = request(Method::GET, "/", Some(("the-user", "wrong")), None);
        assert!(auth.authenticate(req.headers()).is_err());
    }
}
