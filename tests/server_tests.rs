//! Integration tests for the HTTP adapter.
//!
//! Requests go through an in-process actix service; the platform is a
//! wiremock server whose call counts show which requests reached it.

use actix_web::http::{header, Method, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use shopify_graphql_proxy::config::MapEnvironment;
use shopify_graphql_proxy::server::{configure_routes, cors_headers, AppState, MAX_BODY_BYTES};
use shopify_graphql_proxy::{Proxy, ProxyConfig, SharedSecret};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCOPES_PATH: &str = "/admin/oauth/access_scopes.json";
const GRAPHQL_PATH: &str = "/admin/api/2026-07/graphql.json";
const SECRET: &str = "workflow-secret";

fn state_for(server: &MockServer, shared_secret: Option<&str>) -> web::Data<AppState> {
    let uri = server.uri();
    let env = MapEnvironment::from([
        ("SHOPIFY_SHOP_DOMAIN", "demo.myshop.test"),
        ("SHOPIFY_ACCESS_TOKEN", "shpat_test_token"),
        ("SHOPIFY_REQUIRED_SCOPES", "read_orders,read_products"),
        ("SHOPIFY_API_HOST", uri.as_str()),
    ]);
    let proxy = Proxy::new(ProxyConfig::resolve(&env).unwrap()).unwrap();
    let secret = shared_secret.map(|s| SharedSecret::new(s).unwrap());

    web::Data::new(AppState::new(proxy, secret))
}

async fn mount_platform(server: &MockServer, granted: &[&str], graphql_calls: u64) {
    let access_scopes: Vec<_> = granted
        .iter()
        .map(|handle| json!({ "handle": handle }))
        .collect();

    Mock::given(method("GET"))
        .and(path(SCOPES_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_scopes": access_scopes })),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "shop": { "name": "Test Shop" } } })),
        )
        .expect(graphql_calls)
        .mount(server)
        .await;
}

async fn expect_no_platform_calls(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

fn graphql_post(body: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/graphql")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(body.to_string())
}

/// A well-formed query whose `variables` push the body past `MAX_BODY_BYTES`.
fn oversized_query() -> String {
    let padding = "x".repeat(MAX_BODY_BYTES);
    json!({ "query": "query { shop { name } }", "variables": { "padding": padding } }).to_string()
}

fn error_message(body: &Value) -> &str {
    body["errors"][0]["message"].as_str().unwrap_or_default()
}

// ============================================================================
// POST /graphql
// ============================================================================

#[actix_web::test]
async fn test_post_graphql_with_valid_secret_returns_data() {
    let server = MockServer::start().await;
    mount_platform(&server, &["read_orders", "read_products"], 1).await;

    let app = test::init_service(
        App::new()
            .wrap(cors_headers())
            .configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    let request = graphql_post(r#"{"query":"query { shop { name } }"}"#)
        .insert_header((header::AUTHORIZATION, format!("Bearer {SECRET}")))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "data": { "shop": { "name": "Test Shop" } } }));
}

#[actix_web::test]
async fn test_post_graphql_without_secret_configuration_is_open() {
    let server = MockServer::start().await;
    mount_platform(&server, &["read_orders", "read_products"], 1).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, None))),
    )
    .await;

    let request = graphql_post(r#"{"query":"query { shop { name } }"}"#).to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_post_graphql_with_wrong_or_missing_secret_is_unauthorized() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    let missing = graphql_post(r#"{"query":"query { shop { name } }"}"#).to_request();
    let response = test::call_service(&app, missing).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(error_message(&body), "Unauthorized");

    let wrong = graphql_post(r#"{"query":"query { shop { name } }"}"#)
        .insert_header((header::AUTHORIZATION, "Bearer not-the-secret"))
        .to_request();
    let response = test::call_service(&app, wrong).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_secret_is_checked_before_body() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    let response = test::call_service(&app, graphql_post("not json").to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_oversized_body_without_secret_is_unauthorized() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    let response = test::call_service(&app, graphql_post(&oversized_query()).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(error_message(&body), "Unauthorized");
}

#[actix_web::test]
async fn test_oversized_body_with_valid_secret_is_rejected_with_errors() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    let request = graphql_post(&oversized_query())
        .insert_header((header::AUTHORIZATION, format!("Bearer {SECRET}")))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = test::read_body_json(response).await;
    assert!(error_message(&body).starts_with("Request body exceeds"));
}

#[actix_web::test]
async fn test_oversized_body_without_secret_configuration_is_rejected_with_errors() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, None))),
    )
    .await;

    let response = test::call_service(&app, graphql_post(&oversized_query()).to_request()).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = test::read_body_json(response).await;
    assert!(error_message(&body).starts_with("Request body exceeds"));
}

#[actix_web::test]
async fn test_body_above_default_extractor_limit_is_accepted() {
    let server = MockServer::start().await;
    mount_platform(&server, &["read_orders", "read_products"], 1).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    let padding = "x".repeat(300_000);
    let body = json!({ "query": "query { shop { name } }", "variables": { "padding": padding } });
    let request = graphql_post(&body.to_string())
        .insert_header((header::AUTHORIZATION, format!("Bearer {SECRET}")))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_malformed_bodies_are_bad_requests() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, None))),
    )
    .await;

    for body in [
        "not json",
        "{}",
        r#"{"query":""}"#,
        r#"{"query":"{ shop { id } }","variables":"x"}"#,
    ] {
        let response = test::call_service(&app, graphql_post(body).to_request()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let json: Value = test::read_body_json(response).await;
        assert!(error_message(&json).starts_with("Malformed request"));
    }
}

#[actix_web::test]
async fn test_missing_scope_is_a_server_error_without_query() {
    let server = MockServer::start().await;
    mount_platform(&server, &["read_products"], 0).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, None))),
    )
    .await;

    let request = graphql_post(r#"{"query":"query { shop { name } }"}"#).to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert!(error_message(&body).contains("read_orders"));
}

// ============================================================================
// Preflight, Liveness and Routing
// ============================================================================

#[actix_web::test]
async fn test_options_preflight_returns_no_content_with_cors_headers() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new()
            .wrap(cors_headers())
            .configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    for uri in ["/graphql", "/health", "/anything"] {
        let request = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri(uri)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT, "uri: {uri}");
        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, OPTIONS"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type, Authorization"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
        assert!(test::read_body(response).await.is_empty());
    }
}

#[actix_web::test]
async fn test_health_endpoints() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, Some(SECRET)))),
    )
    .await;

    for uri in ["/", "/health"] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "status": "ok", "service": "shopify-graphql-proxy" }));
    }
}

#[actix_web::test]
async fn test_get_graphql_describes_the_proxy() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, None))),
    )
    .await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/graphql").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["service"], "shopify-graphql-proxy");
    assert_eq!(body["endpoint"], "/graphql");
    assert_eq!(body["apiVersion"], "2026-07");
    assert_eq!(body["requiredScopes"], json!(["read_orders", "read_products"]));
}

#[actix_web::test]
async fn test_unknown_path_and_method() {
    let server = MockServer::start().await;
    expect_no_platform_calls(&server).await;

    let app = test::init_service(
        App::new().configure(configure_routes(state_for(&server, None))),
    )
    .await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        test::call_service(&app, test::TestRequest::put().uri("/graphql").to_request()).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response =
        test::call_service(&app, test::TestRequest::delete().uri("/health").to_request()).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
