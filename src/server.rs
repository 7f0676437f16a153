use crate::error::{PublishError, Result};
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tokio_util::io::ReaderStream;

/// Channel reference as the server serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRef {
    pub name: String,
}

/// One uploaded asset inside a version record.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRecord {
    pub name: String,
}

/// Server-side version record: name, channel, and the assets already uploaded.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionRecord {
    pub name: String,
    pub channel: ChannelRef,
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Authenticated HTTP client for the release server API.
///
/// Constructed via [`ReleaseServerClient::login`]; holding a value of this
/// type means authentication already succeeded and the bearer token is
/// attached to every request.
#[derive(Clone)]
pub struct ReleaseServerClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ReleaseServerClient {
    /// Exchange credentials for a bearer token and return an authenticated client.
    pub async fn login(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("relpush/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(300))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();

        tracing::debug!("attempting to authenticate to release server");

        let response = http
            .post(format!("{base_url}/api/auth/login"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| PublishError::Auth(format!("auth endpoint unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(PublishError::Auth(format!(
                "login rejected with status {}",
                response.status()
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Auth(format!("malformed login response: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token: body.token,
        })
    }

    /// Fetch the full list of version records.
    pub async fn list_versions(&self) -> Result<Vec<VersionRecord>> {
        let response = self
            .http
            .get(self.api("api/version"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PublishError::Server { status, body });
        }

        Ok(response.json().await?)
    }

    /// Create a version record with the given name on a channel.
    pub async fn create_version(&self, name: &str, channel: &str) -> Result<()> {
        tracing::info!("Creating new version record: {} ({})", name, channel);

        let response = self
            .http
            .post(self.api("api/version"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "channel": { "name": channel },
                "name": name,
                "notes": "",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PublishError::VersionCreation(format!("{status} - {body}")));
        }

        Ok(())
    }

    /// Upload one artifact as a multipart form, streaming the file body.
    pub async fn upload_asset(&self, version: &str, platform: &str, artifact: &Path) -> Result<()> {
        let asset_name = artifact
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                PublishError::AssetUpload(format!("invalid artifact path: {}", artifact.display()))
            })?;

        tracing::debug!("attempting to upload asset: {}", artifact.display());

        // The file handle lives inside the request body stream and is
        // dropped when the request completes or errors.
        let file = tokio::fs::File::open(artifact).await?;
        let part = multipart::Part::stream(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .file_name(asset_name.to_string());

        let form = multipart::Form::new()
            .text("token", self.token.clone())
            .text("version", version.to_string())
            .text("platform", platform.to_string())
            .part("file", part);

        let response = self
            .http
            .post(self.api("api/asset"))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PublishError::AssetUpload(format!(
                "{asset_name}: {status} - {body}"
            )));
        }

        tracing::debug!("upload successful for asset: {}", asset_name);
        Ok(())
    }

    fn api(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Map an OS/architecture pair to the server's platform vocabulary.
///
/// Total over any input: unknown OS identifiers pass through unchanged.
pub fn server_platform(platform: &str, arch: &str) -> String {
    match platform {
        "darwin" => "osx_64".to_string(),
        "linux" => {
            if arch == "ia32" {
                "linux_32".to_string()
            } else {
                "linux_64".to_string()
            }
        }
        "win32" => {
            if arch == "ia32" {
                "windows_32".to_string()
            } else {
                "windows_64".to_string()
            }
        }
        _ => platform.to_string(),
    }
}
