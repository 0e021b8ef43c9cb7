//! Print store statistics from a running server.

use tracing::info;

use voltbay_client::{ClientConfig, StoreClient};

/// Fetch `/stats` and print the counts.
///
/// Reads the server location from `VOLTBAY_API_URL`.
///
/// # Errors
///
/// Returns an error if the server is unreachable or responds with an
/// unexpected status.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let client = StoreClient::new(&config);
    let stats = client.stats().await?;

    info!("Store statistics");
    info!("  Users:    {}", stats.users);
    info!("  Products: {}", stats.products);
    info!("  Orders:   {}", stats.orders);
    info!("  Revenue:  ${:.2}", stats.revenue);

    Ok(())
}
