//! Networking: transport seam, GraphQL gateway, login exchange, wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves bytes, `gateway` owns the GraphQL contract, `auth` talks
//! to the login endpoint, and `types` defines the shared wire schema.

pub mod auth;
pub mod gateway;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;
pub mod types;

/// Transport used by the running console on this platform.
#[cfg(feature = "csr")]
pub type PlatformTransport = transport::BrowserTransport;

/// Transport used by the running console on this platform.
#[cfg(all(not(feature = "csr"), not(target_arch = "wasm32")))]
pub type PlatformTransport = transport::HttpTransport;
