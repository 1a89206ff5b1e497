use shopify_graphql_proxy::config::{ProxyConfig, SystemEnvironment};
use shopify_graphql_proxy::logging;
use shopify_graphql_proxy::proxy::Proxy;
use shopify_graphql_proxy::server::{self, ServerConfig, ServerError};

#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    logging::init();

    let env = SystemEnvironment;
    let config = ProxyConfig::resolve(&env)?;
    let server_config = ServerConfig::resolve(&env)?;

    server::run(server_config, Proxy::new(config)?).await
}
