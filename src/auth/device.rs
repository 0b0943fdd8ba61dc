//! OAuth 2.0 device authorization grant against an OIDC issuer.
//!
//! ```text
//! GET  <issuer>/.well-known/openid-configuration   → endpoints
//! POST device_authorization_endpoint               → user code + URL
//! POST token_endpoint (poll every `interval` s)    → access token
//! ```

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};
use serde::Deserialize;

use super::AuthError;
use super::token::Token;

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SCOPES: &str = "openid profile email";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const SLOW_DOWN_STEP_SECS: u64 = 5;

#[derive(Deserialize, Debug)]
struct Discovery {
    device_authorization_endpoint: String,
    token_endpoint: String,
}

#[derive(Deserialize, Debug)]
struct DeviceAuthorization {
    device_code: String,
    user_code: String,
    verification_uri: String,
    #[serde(default)]
    verification_uri_complete: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    interval: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Run the device flow to completion, printing instructions to `out`.
pub async fn device_login(
    client: &reqwest::Client,
    issuer: &str,
    client_id: &str,
    out: &mut dyn Write,
) -> Result<Token, AuthError> {
    let discovery_url = format!(
        "{}/.well-known/openid-configuration",
        issuer.trim_end_matches('/')
    );
    let discovery: Discovery = client
        .get(&discovery_url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AuthError::Discovery(e.to_string()))?
        .json()
        .await
        .map_err(|e| AuthError::Discovery(e.to_string()))?;
    debug!("OIDC discovery: {:?}", discovery);

    let device: DeviceAuthorization = client
        .post(&discovery.device_authorization_endpoint)
        .form(&[("client_id", client_id), ("scope", SCOPES)])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AuthError::Network(e.to_string()))?
        .json()
        .await
        .map_err(|e| AuthError::Parse(e.to_string()))?;

    print_instructions(&device, out).map_err(AuthError::Io)?;

    let mut interval = device.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
    loop {
        tokio::time::sleep(Duration::from_secs(interval)).await;

        let response = client
            .post(&discovery.token_endpoint)
            .form(&[
                ("grant_type", DEVICE_CODE_GRANT),
                ("device_code", device.device_code.as_str()),
                ("client_id", client_id),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if response.status().is_success() {
            let body: TokenResponse = response
                .json()
                .await
                .map_err(|e| AuthError::Parse(e.to_string()))?;
            info!("Device login complete");
            return Ok(Token {
                access_token: body.access_token,
                token_type: body.token_type,
                refresh_token: body.refresh_token,
                expiry: body
                    .expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs)),
            });
        }

        let status = response.status();
        let body: TokenErrorResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(format!("token endpoint returned {status}: {e}")))?;
        match body.error.as_str() {
            "authorization_pending" => debug!("Authorization pending"),
            "slow_down" => {
                interval += SLOW_DOWN_STEP_SECS;
                debug!("Slowing down, polling every {}s", interval);
            }
            "expired_token" => return Err(AuthError::Expired),
            _ => {
                return Err(AuthError::Denied(
                    body.error_description.unwrap_or(body.error),
                ));
            }
        }
    }
}

fn print_instructions(device: &DeviceAuthorization, out: &mut dyn Write) -> std::io::Result<()> {
    match &device.verification_uri_complete {
        Some(url) if !url.is_empty() => {
            writeln!(out, "> Visit the following URL to complete login: {url}")?;
        }
        _ => {
            writeln!(
                out,
                "> Visit the following URL and enter the device code to complete login: {}",
                device.verification_uri
            )?;
            writeln!(out, "> Code: {}", device.user_code)?;
        }
    }
    match device.expires_in {
        Some(secs) => {
            let expiry = chrono::Local::now() + chrono::Duration::seconds(secs);
            writeln!(
                out,
                "\n> Waiting for login (expires at: {})...",
                expiry.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
        None => writeln!(out, "\n> Waiting for login...")?,
    }
    out.flush()
}
