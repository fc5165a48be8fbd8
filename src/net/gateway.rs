//! Query gateway: every GraphQL call the console makes goes through here.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hand a [`GraphqlRequest`] to [`QueryGateway::execute`]; the gateway
//! attaches whatever token the session holds at that instant, posts to the one
//! configured endpoint, and normalizes the outcome.
//!
//! ERROR HANDLING
//! ==============
//! - no response at all -> [`GatewayError::Transport`]
//! - any status other than 200 -> [`GatewayError::Status`], raw response kept
//! - 200 with a non-empty `errors` list -> [`GatewayError::Graphql`], verbatim,
//!   even when `data` is also present or an entry has no `message`
//! - otherwise the `data` member is returned, `null` included
//!
//! Nothing is retried. An expired token surfaces as a `Graphql` error; deciding
//! to sign out is up to the caller.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{RawResponse, Transport, TransportError};
use super::types::{GraphqlError, GraphqlRequest};
use crate::state::session::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("graphql transport failed: {0}")]
    Transport(#[from] TransportError),
    #[error("graphql endpoint returned HTTP {}", .0.status)]
    Status(RawResponse),
    #[error("graphql request failed: {}", join_messages(.0))]
    Graphql(Vec<GraphqlError>),
    #[error("invalid graphql response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Backend-reported errors, if this is a GraphQL-level failure.
    pub fn graphql_errors(&self) -> Option<&[GraphqlError]> {
        match self {
            Self::Graphql(errors) => Some(errors),
            _ => None,
        }
    }
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Turn a raw endpoint response into `data` or a typed failure.
///
/// # Errors
///
/// See the module docs for the mapping.
pub fn interpret_response(response: RawResponse) -> Result<Value, GatewayError> {
    if response.status != 200 {
        return Err(GatewayError::Status(response));
    }
    let body: Value = serde_json::from_str(&response.body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    let Value::Object(mut envelope) = body else {
        return Err(GatewayError::Decode("response body is not a JSON object".to_owned()));
    };
    match envelope.remove("errors") {
        None | Some(Value::Null) => {}
        Some(Value::Array(errors)) if errors.is_empty() => {}
        Some(Value::Array(errors)) => {
            return Err(GatewayError::Graphql(errors.into_iter().map(GraphqlError::from).collect()));
        }
        Some(other) => return Err(GatewayError::Graphql(vec![GraphqlError::from(other)])),
    }
    envelope
        .remove("data")
        .ok_or_else(|| GatewayError::Decode("response has no data member".to_owned()))
}

/// Post one GraphQL request with an explicit token and interpret the result.
///
/// # Errors
///
/// Returns [`GatewayError`] for transport, status, protocol, or decode failures.
pub async fn post_graphql<T: Transport>(
    transport: &T,
    endpoint: &str,
    token: Option<&str>,
    request: &GraphqlRequest,
) -> Result<Value, GatewayError> {
    let body = serde_json::to_value(request).map_err(TransportError::from)?;
    tracing::debug!(endpoint, authorized = token.is_some(), "graphql request");
    let response = transport.post_json(endpoint, token, &body).await.map_err(|e| {
        tracing::warn!(endpoint, error = %e, "graphql transport failed");
        e
    })?;
    let status = response.status;
    interpret_response(response).inspect_err(|e| {
        tracing::warn!(endpoint, status, error = %e, "graphql request failed");
    })
}

/// Session-aware GraphQL client bound to one endpoint.
#[derive(Clone, Debug)]
pub struct QueryGateway<T> {
    endpoint: String,
    transport: T,
    session: SessionStore,
}

impl<T: Transport> QueryGateway<T> {
    pub fn new(endpoint: impl Into<String>, transport: T, session: SessionStore) -> Self {
        Self { endpoint: endpoint.into(), transport, session }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send `request` with the session's current token and return `data`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport, status, protocol, or decode failures.
    pub async fn execute(&self, request: &GraphqlRequest) -> Result<Value, GatewayError> {
        let token = self.session.current_token();
        post_graphql(&self.transport, &self.endpoint, token.as_deref(), request).await
    }

    /// [`QueryGateway::execute`], then deserialize `data` into `D`.
    ///
    /// # Errors
    ///
    /// As [`QueryGateway::execute`], plus [`GatewayError::Decode`] when `data`
    /// does not fit `D`.
    pub async fn execute_as<D: DeserializeOwned>(&self, request: &GraphqlRequest) -> Result<D, GatewayError> {
        let data = self.execute(request).await?;
        serde_json::from_value(data).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}
