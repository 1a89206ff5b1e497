//! GraphQL query forwarding for the Shopify Admin API.
//!
//! This module provides a GraphQL client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that forwards caller-supplied
//! documents and relays the result.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: Posts documents to `/admin/api/{version}/graphql.json`
//! - [`GraphqlError`]: Error type for transport failures and query-level errors
//!
//! # Response Structure
//!
//! GraphQL responses contain these fields in the body:
//!
//! - `data`: The query result data, returned to the caller
//! - `errors`: Query-level errors (still HTTP 200), turned into [`GraphqlError::Execution`]
//! - `extensions`: Query cost information, dropped
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_graphql_proxy::clients::graphql::GraphqlClient;
//!
//! let client = GraphqlClient::new(&config)?;
//! let data = client.execute("query { shop { name } }", None, None).await?;
//! ```

mod client;
mod errors;

pub use client::GraphqlClient;
pub use errors::GraphqlError;
