//! Build a query against the public identity API and run it
//!
//! ```sh
//! cargo run --example playground -- 21957
//! RUST_LOG=vqb=debug cargo run --example playground -- 21957
//! ```
//!
//! Set `TELEMETRY_TOKEN` to also fetch the latest speed from the telemetry API.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use vqb::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vqb=info")),
        )
        .init();

    let token_id = std::env::args().nth(1).unwrap_or_else(|| "21957".to_string());

    // Identity API: public, no token
    let identity = QuerySession::http(ApiConfig::identity())?;
    println!("📋 Identity roots: {}", identity.registry().ids().join(", "));

    identity.select_root("vehicle")?;
    identity.set_parameter("tokenId", &token_id)?;
    for path in ["owner", "mintedAt", "definition.make", "definition.model", "definition.year"] {
        identity.toggle(path)?;
    }

    println!("\n{}\n", identity.compiled()?);
    match identity.run().await {
        Ok(response) => println!("✅ {}", serde_json::to_string_pretty(&response)?),
        Err(e) => println!("❌ {}", e),
    }

    // Telemetry API: bearer token required
    let telemetry = QuerySession::http(ApiConfig::telemetry())?;
    telemetry.set_token(std::env::var("TELEMETRY_TOKEN").ok());
    telemetry.select_root("signalsLatest")?;
    telemetry.set_parameter("tokenId", &token_id)?;
    telemetry.toggle("speed.value")?;
    telemetry.toggle("speed.timestamp")?;

    println!("\n{}\n", telemetry.compiled()?);
    match telemetry.run().await {
        Ok(response) => println!("✅ {}", serde_json::to_string_pretty(&response)?),
        Err(QueryBuilderError::NotExecutable(issues)) => {
            for issue in issues {
                println!("⚠️  {}", issue);
            }
        }
        Err(e) => println!("❌ {}", e),
    }

    Ok(())
}
