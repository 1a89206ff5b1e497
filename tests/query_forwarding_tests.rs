//! Integration tests for the GraphQL query forwarder.
//!
//! A wiremock server stands in for the Admin GraphQL endpoint.

use serde_json::json;
use shopify_graphql_proxy::config::MapEnvironment;
use shopify_graphql_proxy::{GraphqlClient, GraphqlError, HttpError, ProxyConfig};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/admin/api/2025-10/graphql.json";

fn client_for(server: &MockServer) -> GraphqlClient {
    let uri = server.uri();
    let env = MapEnvironment::from([
        ("SHOPIFY_SHOP_DOMAIN", "demo.myshop.test"),
        ("SHOPIFY_ACCESS_TOKEN", "shpat_test_token"),
        ("SHOPIFY_API_VERSION", "2025-10"),
        ("SHOPIFY_API_HOST", uri.as_str()),
    ]);
    GraphqlClient::new(&ProxyConfig::resolve(&env).unwrap()).unwrap()
}

#[tokio::test]
async fn test_query_is_posted_verbatim_with_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", "shpat_test_token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "query": "query($first: Int!) { products(first: $first) { nodes { title } } }",
            "variables": { "first": 2 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "products": { "nodes": [{ "title": "Hat" }, { "title": "Scarf" }] } },
            "extensions": { "cost": { "requestedQueryCost": 4 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = client_for(&server)
        .execute(
            "query($first: Int!) { products(first: $first) { nodes { title } } }",
            Some(json!({ "first": 2 })),
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        data,
        json!({ "products": { "nodes": [{ "title": "Hat" }, { "title": "Scarf" }] } })
    );
}

#[tokio::test]
async fn test_operation_name_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_json(json!({
            "query": "query A { shop { name } } query B { shop { id } }",
            "variables": null,
            "operationName": "B"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "shop": { "id": "gid://shopify/Shop/1" } } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let data = client_for(&server)
        .execute("query A { shop { name } } query B { shop { id } }", None, Some("B"))
        .await
        .unwrap();

    assert_eq!(data["shop"]["id"], "gid://shopify/Shop/1");
}

#[tokio::test]
async fn test_errors_take_precedence_over_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "shop": { "name": "Test Shop" } },
            "errors": [{ "message": "Throttled", "extensions": { "code": "THROTTLED" } }]
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .execute("query { shop { name } }", None, None)
        .await
        .unwrap_err();

    match error {
        GraphqlError::Execution { errors } => {
            let errors: serde_json::Value = serde_json::from_str(&errors).unwrap();
            assert_eq!(errors[0]["message"], "Throttled");
            assert_eq!(errors[0]["extensions"]["code"], "THROTTLED");
        }
        other => panic!("Expected Execution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_success_status_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .execute("query { shop { name } }", None, None)
        .await
        .unwrap_err();

    match error {
        GraphqlError::Http(HttpError::Response(response)) => {
            assert_eq!(response.code, 502);
            assert_eq!(response.message, "Bad Gateway");
        }
        other => panic!("Expected HTTP response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .execute("query { shop { name } }", None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        GraphqlError::Http(HttpError::InvalidBody { code: 200, .. })
    ));
}

#[tokio::test]
async fn test_response_without_data_is_returned_whole() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "extensions": { "cost": {} } })),
        )
        .mount(&server)
        .await;

    let data = client_for(&server)
        .execute("query { shop { name } }", None, None)
        .await
        .unwrap();

    assert_eq!(data, json!({ "extensions": { "cost": {} } }));
}
