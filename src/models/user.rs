use serde::{Deserialize, Serialize};

/// Credential record loaded from the users file at startup.
///
/// Older user files were written with capitalized keys (`ID`, `Name`,
/// `Password`), so both spellings are accepted when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Password")]
    pub password: String,
}
