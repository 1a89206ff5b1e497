use std::process::ExitCode;

use clap::Parser;
use shopify_graphql_proxy::cli::{self, Cli};
use shopify_graphql_proxy::config::SystemEnvironment;
use shopify_graphql_proxy::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = cli::run(&cli, &SystemEnvironment).await;
    cli::report(result, std::io::stdout().lock(), std::io::stderr().lock())
}
