// zapgen-net/src/api.rs
use std::sync::Arc;

use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::{debug, error};
use zapgen_common::config::Config;
use zapgen_common::error::{Result, ZapgenError};
use zapgen_common::model::CaskRecord;

const USER_AGENT_STRING: &str = "zapgen uninstall-script generator (Rust)";

/// Map an application display name to its likely API token:
/// lowercase, spaces replaced by hyphens.
pub fn api_token(app_name: &str) -> String {
    app_name.to_lowercase().replace(' ', "-")
}

/// Fetch and parse one cask record by application name. Cask tokens are not
/// always a mechanical rewrite of the display name, so on a failed direct
/// fetch two alternative spellings are tried: hyphens stripped, and hyphens
/// replaced by underscores.
pub async fn fetch_cask_record(app_name: &str, config: &Config) -> Result<CaskRecord> {
    let token = api_token(app_name);
    let candidates = [
        token.clone(),
        token.replace('-', ""),
        token.replace('-', "_"),
    ];

    let client = build_api_client()?;
    let mut last_error: Option<ZapgenError> = None;

    for candidate in &candidates {
        let url = format!("{}/cask/{}.json", config.api_base_url, candidate);
        debug!("Fetching cask data for '{}' from {}", app_name, url);
        match fetch_raw_json(&client, &url).await {
            Ok(body) => {
                let record: CaskRecord = serde_json::from_str(&body).map_err(|e| {
                    error!("Failed to parse cask JSON for '{}': {}", app_name, e);
                    ZapgenError::Json(Arc::new(e))
                })?;
                return Ok(record);
            }
            Err(e) => {
                debug!("Fetch attempt for token '{}' failed: {}", candidate, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        ZapgenError::NotFound(format!("No cask data found for '{app_name}'"))
    }))
}

fn build_api_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, USER_AGENT_STRING.parse().unwrap());
    headers.insert(ACCEPT, "application/json".parse().unwrap());
    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| ZapgenError::HttpError(format!("Failed to build HTTP client: {e}")))
}

async fn fetch_raw_json(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await.map_err(|e| {
        debug!("HTTP request failed for {}: {}", url, e);
        ZapgenError::Http(Arc::new(e))
    })?;
    if !response.status().is_success() {
        let status = response.status();
        return Err(ZapgenError::Api(format!("HTTP status {status} from {url}")));
    }
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Err(ZapgenError::Api(format!(
            "Empty response body received from {url}"
        )));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_token_lowercases_and_hyphenates() {
        assert_eq!(api_token("Adobe Acrobat Reader"), "adobe-acrobat-reader");
        assert_eq!(api_token("firefox"), "firefox");
    }
}
