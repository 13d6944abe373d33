//! GraphQL API exposure
//!
//! Builds the typed async-graphql schema over the host's operations and
//! mounts it on an axum router.

mod mutation;
mod query;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::server::host::ServerHost;
use anyhow::Result;
use async_graphql::{
    EmptySubscription, Schema,
    http::{GraphQLPlaygroundConfig, playground_source},
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;

pub type CrmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the executable schema for a host
    pub fn build_schema(host: &ServerHost) -> CrmSchema {
        Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(host.operations.clone())
            .finish()
    }

    /// Build the GraphQL router from a host
    ///
    /// Returns a router with:
    /// - `POST /graphql` (also with a trailing slash) for queries and mutations
    /// - `GET /graphql/playground`
    /// - `GET /graphql/schema` for the SDL
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let schema = Self::build_schema(&host);

        let router = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/graphql/", post(graphql_handler))
            .route("/graphql/playground", get(graphql_playground))
            .route("/graphql/schema", get(graphql_schema))
            .layer(Extension(schema));

        Ok(router)
    }
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(Extension(schema): Extension<CrmSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Handler for GraphQL playground UI
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Handler for GraphQL schema SDL export
async fn graphql_schema(Extension(schema): Extension<CrmSchema>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        schema.sdl(),
    )
}
