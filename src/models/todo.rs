use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single task owned by a user.
///
/// Every field may be omitted in a request body. Persistence fills in an
/// empty `id` together with a fresh `created` on create; `user_id` is always
/// replaced with the authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    pub user_id: String,
}

impl Todo {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Whether an identity has been assigned; an empty id means "generate one".
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.created {
            Some(created) => write!(
                f,
                "[{}] {}",
                created.to_rfc3339_opts(SecondsFormat::Secs, true),
                self.title
            ),
            None => write!(f, "[-] {}", self.title),
        }
    }
}
