use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use scraper::{Html, Selector};
use spider_client::{RequestParams, Spider};
use tracing::{info, warn};

/// Upper bound on the rendered fetch, marker wait included.
const RENDER_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetch one source page. The primary strategy is a rendered fetch through
/// spider.cloud, bounded by a 20 s timeout and validated against the
/// site's content marker (dynamically-loaded pages return a shell before the
/// fact list exists). Any primary failure falls back once to a plain GET,
/// which raises on non-success status. No further retries.
pub async fn fetch_page(url: &str, marker: &str) -> Result<String> {
    info!("Fetching {url}");
    match fetch_rendered(url, marker).await {
        Ok(html) => {
            info!("Fetched {url} via rendered fetch");
            return Ok(html);
        }
        Err(e) => {
            warn!("Rendered fetch failed for {url} ({e:#}). Falling back to plain GET.");
        }
    }

    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.text().await?)
}

async fn fetch_rendered(url: &str, marker: &str) -> Result<String> {
    let api_key = std::env::var("SPIDER_API_KEY").context("SPIDER_API_KEY not set")?;
    let spider =
        Spider::new(Some(api_key)).map_err(|e| anyhow!("Failed to create Spider client: {}", e))?;

    // Default return format is the raw page HTML
    let params = RequestParams::default();
    let response = tokio::time::timeout(
        RENDER_TIMEOUT,
        spider.scrape_url(url, Some(params), "application/json"),
    )
    .await
    .context("rendered fetch timed out")?
    .map_err(|e| anyhow!("rendered fetch failed: {}", e))?;

    let parsed: serde_json::Value = match response.as_str() {
        Some(s) => serde_json::from_str(s).unwrap_or(response.clone()),
        None => response,
    };

    let html = parsed
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|obj| obj.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| anyhow!("no content in rendered response"))?;

    if !has_marker(html, marker) {
        bail!("content marker '{marker}' not present after render");
    }
    Ok(html.to_string())
}

fn has_marker(html: &str, marker: &str) -> bool {
    let Ok(selector) = Selector::parse(marker) else {
        return false;
    };
    Html::parse_document(html).select(&selector).next().is_some()
}

// ── Tests ──
