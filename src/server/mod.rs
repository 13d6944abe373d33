//! HTTP server for the CRM GraphQL API
//!
//! `ServerBuilder` wires a store and configuration into a `ServerHost` and
//! exposes it as:
//! - GraphQL at `/graphql` (plus playground and SDL routes)
//! - Health checks at `/health` and `/healthz`

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::GraphQLExposure;
pub use host::ServerHost;
