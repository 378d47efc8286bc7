use portal_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Telemetry, backend client, brand resolvers and routes
    let (_state, router) = portal_api::setup::initialize_app(config.clone()).await?;

    portal_api::setup::server::start_server(&config, router).await
}
