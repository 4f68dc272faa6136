// src/edgar/client.rs
use crate::utils::error::EdgarError;
use reqwest::header;
use std::time::Duration;

// IMPORTANT: Replace with your actual details or make configurable
const EDGAR_USER_AGENT: &str = "xbrl_extractor research contact@example.com";
// SEC asks for 10 requests/second max. Be conservative. >100ms delay.
const EDGAR_REQUEST_DELAY_MS: u64 = 150;

/// Creates a reqwest client configured for EDGAR interaction.
fn build_edgar_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(EDGAR_USER_AGENT) // Set the required User-Agent
        .build()
}

/// Downloads a specific XBRL instance document from its URL.
/// Includes mandatory User-Agent and basic rate limiting. This is the thin
/// stand-in for the crawl collaborator; the extractor core never performs
/// network I/O itself.
pub async fn download_filing_doc(url: &str) -> Result<String, EdgarError> {
    let client = build_edgar_client()?; // Propagate client build error if any

    tracing::info!("Downloading document from: {}", url);
    tracing::debug!("Using User-Agent: {}", EDGAR_USER_AGENT);

    // --- Basic Rate Limiting ---
    // In a real app, use a more sophisticated approach like `governor`
    // especially if making concurrent requests.
    tokio::time::sleep(Duration::from_millis(EDGAR_REQUEST_DELAY_MS)).await;
    // --------------------------

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/xml,text/xml,text/plain,*/*")
        .send()
        .await?; // Propagates reqwest::Error as EdgarError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
            return Err(EdgarError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!("Received 404 Not Found for URL: {}", url);
            return Err(EdgarError::FilingDocNotFound(url.to_string()));
        }
        return Err(EdgarError::Http(status));
    }

    // Read the response body as text
    let body = response.text().await?; // Propagates reqwest::Error as EdgarError::Network
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}
