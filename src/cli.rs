//! One-shot command-line adapter.
//!
//! ```text
//! shopify-graphql 'query { shop { name } }'
//! shopify-graphql 'query($first: Int!) { products(first: $first) { nodes { title } } }' \
//!     --variables '{"first": 5}'
//! ```
//!
//! Without a positional query, `SHOPIFY_GRAPHQL_QUERY` is used; without
//! `--variables`, `SHOPIFY_GRAPHQL_VARIABLES`.
//!
//! On success the `data` is printed to stdout as pretty JSON and the exit
//! code is zero. On failure a single `Error: ...` line goes to stderr and the
//! exit code is non-zero.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use crate::config::env::{self, Environment};
use crate::config::ProxyConfig;
use crate::error::ConfigError;
use crate::proxy::{GraphqlRequest, Proxy, ProxyError};

/// Run a GraphQL query against the Shopify Admin API after checking the
/// access token's scopes.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "shopify-graphql", version, about, long_about = None)]
pub struct Cli {
    /// GraphQL document to run [fallback: SHOPIFY_GRAPHQL_QUERY]
    pub query: Option<String>,

    /// Variables as a JSON object [fallback: SHOPIFY_GRAPHQL_VARIABLES]
    #[arg(long, value_name = "JSON")]
    pub variables: Option<String>,

    /// Operation to run when the document defines several
    #[arg(long, value_name = "NAME")]
    pub operation_name: Option<String>,
}

impl Cli {
    /// Builds the request from the arguments, falling back to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::MissingConfiguration`] if no query is given
    /// anywhere, or [`ProxyError::MalformedRequest`] if the variables are not
    /// a JSON object.
    pub fn graphql_request(&self, source: &dyn Environment) -> Result<GraphqlRequest, ProxyError> {
        let query = non_blank(self.query.as_deref())
            .or_else(|| source.get_non_empty(env::SHOPIFY_GRAPHQL_QUERY))
            .ok_or(ConfigError::MissingConfiguration {
                field: env::SHOPIFY_GRAPHQL_QUERY,
            })?;

        let mut request = GraphqlRequest::new(query);

        let variables = non_blank(self.variables.as_deref())
            .or_else(|| source.get_non_empty(env::SHOPIFY_GRAPHQL_VARIABLES));
        if let Some(raw) = variables {
            request = request.with_variables(parse_variables(&raw)?);
        }
        if let Some(name) = non_blank(self.operation_name.as_deref()) {
            request = request.with_operation_name(name);
        }

        Ok(request)
    }
}

/// Resolves the configuration, then runs the query once.
///
/// # Errors
///
/// Returns any [`ProxyError`] raised while building the request, resolving
/// the configuration, checking scopes or forwarding the query.
pub async fn run(cli: &Cli, source: &dyn Environment) -> Result<Value, ProxyError> {
    let config = ProxyConfig::resolve(source)?;
    let request = cli.graphql_request(source)?;

    tracing::info!(shop = %config.shop(), "Running GraphQL query");
    let proxy = Proxy::new(config)?;
    let data = proxy.run(&request).await?;
    tracing::info!("GraphQL query succeeded");

    Ok(data)
}

/// Writes the outcome of [`run`] to the given sinks and picks the exit code.
///
/// Line breaks inside an error message are replaced with spaces, so an
/// upstream body spread over several lines still prints as one line.
pub fn report(
    result: Result<Value, ProxyError>,
    mut stdout: impl Write,
    mut stderr: impl Write,
) -> ExitCode {
    let output = result
        .map_err(|e| e.to_string())
        .and_then(|data| serde_json::to_string_pretty(&data).map_err(|e| e.to_string()))
        .and_then(|text| writeln!(stdout, "{text}").map_err(|e| e.to_string()));

    match output {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            // Nothing left to report to if stderr is gone too.
            let _ = writeln!(stderr, "Error: {}", message.replace(['\r', '\n'], " "));
            ExitCode::FAILURE
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(ToString::to_string)
}

fn parse_variables(raw: &str) -> Result<Value, ProxyError> {
    match serde_json::from_str(raw) {
        Ok(variables @ Value::Object(_)) => Ok(variables),
        Ok(_) => Err(ProxyError::malformed("variables must be a JSON object")),
        Err(e) => Err(ProxyError::malformed(format!("variables are not valid JSON: {e}"))),
    }
}
