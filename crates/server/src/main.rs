//! Feedbackd - HTTP feedback ingestion service
//!
//! This binary serves the submission endpoint in front of the feedbackd
//! pipeline: rate limiting, honeypot filtering, validation, AI
//! classification, and persistence handoff.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up GEMINI_API_KEY and friends from a local .env in development
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
