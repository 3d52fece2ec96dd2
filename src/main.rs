use kpa_api::config::AppConfig;
use kpa_api::database::{pool, schema};
use kpa_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    init_tracing(config.debug);

    let pool = pool::connect(&config.database).await?;
    schema::ensure_schema(&pool).await?;
    schema::seed_default_user(&pool).await?;

    let port = config.api.port;
    let state = AppState::new(pool, config);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("KPA API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let default_filter = if debug {
        "kpa_api=debug,tower_http=debug"
    } else {
        "kpa_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
