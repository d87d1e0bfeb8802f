use applyflow_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    applyflow_api::setup::telemetry::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, notifier, routes)
    let (_state, router) = applyflow_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    applyflow_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
