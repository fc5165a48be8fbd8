//! Wire DTOs for the GraphQL endpoint and the login endpoint.
//!
//! DESIGN
//! ======
//! Backend error objects keep every field they arrive with so callers can
//! inspect `path`/`extensions` without this crate knowing the schema.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GraphQL operation: query (or mutation) text plus variables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), variables: Map::new() }
    }

    /// Add one variable, replacing an existing one with the same name.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

/// One backend-reported error from a GraphQL `errors` list.
///
/// `message` is empty when the backend sent none; whatever it sent instead
/// stays in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    #[serde(default)]
    pub message: String,
    /// Remaining fields (`path`, `locations`, `extensions`, ...) as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Value> for GraphqlError {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut extra) => {
                let message = match extra.remove("message") {
                    None => String::new(),
                    Some(Value::String(message)) => message,
                    Some(other) => other.to_string(),
                };
                Self { message, extra }
            }
            Value::String(message) => Self { message, extra: Map::new() },
            other => Self { message: other.to_string(), extra: Map::new() },
        }
    }
}

impl std::fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", Value::Object(self.extra.clone()))
        } else {
            f.write_str(&self.message)
        }
    }
}

/// Login form payload posted to the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login endpoint body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body written by the backend's HTTP handlers.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: String,
}

/// Identity of the signed-in user, as returned by `userProfile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
}

/// Query used to fetch the signed-in user's profile.
pub const USER_PROFILE_QUERY: &str = "query { userProfile { email } }";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserProfileData {
    pub user_profile: Option<Profile>,
}
