//! relaychat relay - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use relaychat_app::{create_app, with_middleware};
use relaychat_common::Config;
use relaychat_llm::LlmConfig;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing relaychat relay Lambda");

    let config = Config::from_env().map_err(|e| Error::from(format!("Config error: {}", e)))?;

    let llm_config =
        LlmConfig::from_env().map_err(|e| Error::from(format!("LLM config error: {}", e)))?;

    let app = create_app(llm_config)
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let app = with_middleware(app, &config).layer(TraceLayer::new_for_http());

    info!("relaychat relay Lambda ready to serve requests");

    run(app).await
}
