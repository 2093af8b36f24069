use mock_server::Catalog;
use tokio::net::TcpListener;

/// Seed stores come from `MOCK_STORES`, a comma-separated list of
/// `workspace:store` pairs.
fn seed_catalog() -> Catalog {
    let stores = std::env::var("MOCK_STORES").unwrap_or_else(|_| "topp:shapefiles".to_string());
    stores
        .split(',')
        .filter_map(|pair| pair.trim().split_once(':'))
        .fold(Catalog::new(), |catalog, (ws, store)| catalog.with_store(ws, store))
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock geoserver listening, REST root at /rest");
    mock_server::run(listener, seed_catalog()).await
}
