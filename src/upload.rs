use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use videx_core::VidexError;
use videx_experiment::UploadPayload;

pub fn http_client() -> Result<Client, VidexError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| VidexError::Upload(format!("HTTP client build failed: {e}")))
}

/// Sends the session data to the write endpoint. One attempt, no retries.
pub fn save_data(endpoint: &str, payload: &UploadPayload) -> Result<(), VidexError> {
    let client = http_client()?;
    let resp = client
        .post(endpoint)
        .header(USER_AGENT, "videx/0.1 (+reqwest)")
        .json(payload)
        .send()
        .map_err(|e| VidexError::Upload(format!("POST {endpoint} failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(VidexError::Upload(format!(
            "HTTP error {} from {}",
            resp.status(),
            resp.url()
        )));
    }
    log::info!("Data saved to data/{}", payload.id);
    Ok(())
}

pub fn save_local(path: &Path, csv: &str) -> Result<(), VidexError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)?;
    log::info!("Data saved locally to {}", path.display());
    Ok(())
}
