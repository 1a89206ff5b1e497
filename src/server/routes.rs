//! Route table and handlers for the HTTP adapter.
//!
//! `POST /graphql` checks the shared secret before it reads the body, so an
//! unauthenticated caller always gets `401` whatever it sends. Every failure
//! is answered with `{"errors":[{"message"}]}`.

use actix_web::{
    guard,
    http::{header, StatusCode},
    middleware::DefaultHeaders,
    web::{self, ServiceConfig},
    HttpRequest, HttpResponse, Resource,
};
use serde_json::{json, Value};

use crate::config::SharedSecret;
use crate::proxy::{GraphqlRequest, Proxy, ProxyError};

/// Largest `POST /graphql` body the proxy will read, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Service name reported by the liveness and description endpoints.
pub const SERVICE_NAME: &str = "shopify-graphql-proxy";

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    proxy: Proxy,
    shared_secret: Option<SharedSecret>,
}

impl AppState {
    #[must_use]
    pub const fn new(proxy: Proxy, shared_secret: Option<SharedSecret>) -> Self {
        Self {
            proxy,
            shared_secret,
        }
    }

    #[must_use]
    pub const fn proxy(&self) -> &Proxy {
        &self.proxy
    }

    /// Returns `true` if the request may use the proxy.
    ///
    /// Without a configured secret every request is accepted.
    fn authorize(&self, request: &HttpRequest) -> bool {
        let Some(secret) = &self.shared_secret else {
            return true;
        };
        bearer_token(request).is_some_and(|token| secret.verify(token))
    }
}

/// The CORS headers attached to every response.
#[must_use]
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"))
        .add((header::ACCESS_CONTROL_MAX_AGE, "86400"))
}

/// Registers the proxy routes.
///
/// CORS headers are not part of the routes; wrap the app in [`cors_headers`].
pub fn configure_routes(state: web::Data<AppState>) -> impl FnOnce(&mut ServiceConfig) {
    move |app| {
        app.app_data(state)
            .service(resource("/").route(web::get().to(health)))
            .service(resource("/health").route(web::get().to(health)))
            .service(
                resource("/graphql")
                    .route(web::get().to(describe))
                    .route(web::post().to(graphql)),
            )
            .default_service(web::to(not_found));
    }
}

fn resource(path: &str) -> Resource {
    web::resource(path)
        .route(web::route().guard(guard::Options()).to(preflight))
        .default_service(web::to(method_not_allowed))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

async fn describe(state: web::Data<AppState>) -> HttpResponse {
    let config = state.proxy().config();

    HttpResponse::Ok().json(json!({
        "service": SERVICE_NAME,
        "description": "Pass-through proxy for the Shopify Admin GraphQL API. POST a JSON body with 'query' and optional 'variables' and 'operationName'.",
        "endpoint": "/graphql",
        "apiVersion": config.api_version().to_string(),
        "requiredScopes": config.required_scopes(),
    }))
}

async fn graphql(
    http_request: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> HttpResponse {
    if !state.authorize(&http_request) {
        tracing::warn!("Rejected GraphQL request with a missing or invalid shared secret");
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let body = match payload.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Failed to read GraphQL request body");
            return proxy_error_response(&ProxyError::malformed("request body could not be read"));
        }
        Err(_) => {
            let message = format!("Request body exceeds {MAX_BODY_BYTES} bytes");
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, &message);
        }
    };

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => return proxy_error_response(&e),
    };

    match state.proxy().run(&request).await {
        Ok(data) => HttpResponse::Ok().json(json!({ "data": data })),
        Err(e) => {
            tracing::error!(error = %e, "GraphQL request failed");
            proxy_error_response(&e)
        }
    }
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn not_found(http_request: HttpRequest) -> HttpResponse {
    if http_request.method() == actix_web::http::Method::OPTIONS {
        return HttpResponse::NoContent().finish();
    }
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn method_not_allowed() -> HttpResponse {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn bearer_token(request: &HttpRequest) -> Option<&str> {
    let value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token.trim())
}

fn parse_request(body: &[u8]) -> Result<GraphqlRequest, ProxyError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ProxyError::malformed("request body must be valid JSON"))?;

    let query = value
        .get("query")
        .and_then(Value::as_str)
        .filter(|query| !query.trim().is_empty())
        .ok_or_else(|| {
            ProxyError::malformed("request body must include a non-empty 'query' string")
        })?;

    let variables = match value.get("variables") {
        None | Some(Value::Null) => None,
        Some(variables @ Value::Object(_)) => Some(variables.clone()),
        Some(_) => return Err(ProxyError::malformed("'variables' must be a JSON object")),
    };

    let operation_name = match value.get("operationName") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => return Err(ProxyError::malformed("'operationName' must be a string")),
    };

    Ok(GraphqlRequest {
        query: query.to_string(),
        variables,
        operation_name,
    })
}

fn proxy_error_response(error: &ProxyError) -> HttpResponse {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, &error.to_string())
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "errors": [{ "message": message }] }))
}
