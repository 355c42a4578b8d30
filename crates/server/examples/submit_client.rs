//! Examples for using the feedbackd submission API

use reqwest::multipart::{Form, Part};
use reqwest::Client;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Text-only feedback
    println!("2. Submit Text Feedback:");
    let form = Form::new()
        .text("message", "The export button on the reports page does nothing")
        .text("website", "") // honeypot stays empty
        .text("project", "dashboard");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/feedback"))
        .header("origin", "https://app.example.com/reports")
        .multipart(form)
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: Feedback with a screenshot attached
    println!("3. Submit Feedback with Screenshot:");
    // A 1x1 PNG; any image bytes work.
    let png: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
    let form = Form::new()
        .text("message", "Layout breaks at this zoom level, see screenshot")
        .text("website", "")
        .part(
            "screenshot",
            Part::bytes(png.to_vec())
                .file_name("shot.png")
                .mime_str("image/png")?,
        );
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/feedback"))
        .header("origin", "https://app.example.com")
        .multipart(form)
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);

    Ok(())
}
