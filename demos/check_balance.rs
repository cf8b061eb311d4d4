use clickatell::{GatewayClientBuilder, RawPhoneNumber};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = GatewayClientBuilder::from_env()?.build()?;

    let balance = client.account_balance().await?;
    println!("credit: {}", balance.credit);

    if let Ok(msisdn) = std::env::var("CLICKATELL_COVERAGE") {
        let coverage = client.route_coverage(&RawPhoneNumber::new(msisdn)?).await?;
        println!(
            "coverage: {} (charge: {})",
            coverage.detail,
            coverage.charge.as_deref().unwrap_or("n/a")
        );
    }

    Ok(())
}
