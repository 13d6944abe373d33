//! API exposure modules
//!
//! Each exposure consumes a `ServerHost` and produces a Router.

pub mod graphql;
pub mod health;

pub use graphql::GraphQLExposure;
pub use health::health_routes;
