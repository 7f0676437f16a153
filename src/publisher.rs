use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::watch;

use crate::config::PublishConfig;
use crate::error::{PublishError, Result};
use crate::server::{server_platform, ReleaseServerClient, VersionRecord};

/// One publish invocation: what to upload and for which release.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub artifacts: Vec<PathBuf>,
    pub version: String,
    pub platform: String,
    pub arch: String,
}

/// Terminal state of a single artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Already present on the server; nothing transmitted.
    Skipped,
    /// Transferred in this run.
    Uploaded,
}

/// Running completed-count of the upload batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub completed: usize,
    pub total: usize,
}

/// How the run ended when no artifact failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishSummary {
    pub uploaded: usize,
    pub skipped: usize,
}

/// Resolve the release channel for a version.
///
/// First match wins: explicit configuration, then a "beta" substring in the
/// version, then "alpha", then "stable".
pub fn resolve_channel(configured: Option<&str>, version: &str) -> String {
    if let Some(channel) = configured {
        channel.to_string()
    } else if version.contains("beta") {
        "beta".to_string()
    } else if version.contains("alpha") {
        "alpha".to_string()
    } else {
        "stable".to_string()
    }
}

/// Publishes a release to the server: authenticate, ensure the version
/// record exists, upload whatever artifacts the server does not have yet.
pub struct Publisher {
    config: PublishConfig,
    progress: Arc<watch::Sender<UploadProgress>>,
}

impl Publisher {
    /// Create a publisher and the receiver half of its progress channel.
    ///
    /// The receiver observes the upload batch's completed-count; the count
    /// only ever increases within a run.
    pub fn new(config: PublishConfig) -> (Self, watch::Receiver<UploadProgress>) {
        let (tx, rx) = watch::channel(UploadProgress {
            completed: 0,
            total: 0,
        });
        (
            Self {
                config,
                progress: Arc::new(tx),
            },
            rx,
        )
    }

    /// Run the full publish flow.
    ///
    /// Authentication and version reconciliation are sequential; uploads
    /// run concurrently. Fails on the first error anywhere, with no retry.
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishSummary> {
        let client = ReleaseServerClient::login(
            &self.config.base_url,
            &self.config.username,
            &self.config.password,
        )
        .await?;

        let versions = client.list_versions().await?;
        let existing = versions.into_iter().find(|v| v.name == request.version);

        let channel = resolve_channel(self.config.channel.as_deref(), &request.version);

        if existing.is_none() {
            client.create_version(&request.version, &channel).await?;
        }

        self.upload_artifacts(&client, request, existing).await
    }

    async fn upload_artifacts(
        &self,
        client: &ReleaseServerClient,
        request: &PublishRequest,
        existing: Option<VersionRecord>,
    ) -> Result<PublishSummary> {
        let total = request.artifacts.len();
        self.progress.send_replace(UploadProgress {
            completed: 0,
            total,
        });

        let existing_assets: Arc<HashSet<String>> = Arc::new(
            existing
                .map(|v| v.assets.into_iter().map(|a| a.name).collect())
                .unwrap_or_default(),
        );

        let platform = server_platform(&request.platform, &request.arch);

        // Unbounded fan-out: every artifact is dispatched at once. A
        // semaphore in this loop would be the place to cap concurrency.
        let mut tasks = Vec::with_capacity(total);
        for artifact in &request.artifacts {
            tasks.push(tokio::spawn(upload_artifact(
                client.clone(),
                artifact.clone(),
                request.version.clone(),
                platform.clone(),
                Arc::clone(&existing_assets),
                Arc::clone(&self.progress),
            )));
        }

        // Fails fast on the first upload error. Spawned siblings are
        // detached and keep running to their own completion.
        let outcomes = try_join_all(tasks.into_iter().map(|task| async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => Err(PublishError::AssetUpload(format!("upload task failed: {e}"))),
            }
        }))
        .await?;

        let uploaded = outcomes
            .iter()
            .filter(|o| **o == UploadOutcome::Uploaded)
            .count();

        Ok(PublishSummary {
            uploaded,
            skipped: total - uploaded,
        })
    }
}

/// Decide and perform the transfer for one artifact.
///
/// A named function rather than a closure so a bounded worker pool could
/// dispatch it without touching the publish contract.
async fn upload_artifact(
    client: ReleaseServerClient,
    artifact: PathBuf,
    version: String,
    platform: String,
    existing_assets: Arc<HashSet<String>>,
    progress: Arc<watch::Sender<UploadProgress>>,
) -> Result<UploadOutcome> {
    let asset_name = artifact.file_name().and_then(|n| n.to_str());

    let outcome = match asset_name {
        Some(name) if existing_assets.contains(name) => {
            tracing::debug!(
                "asset at path {} already exists on server",
                artifact.display()
            );
            UploadOutcome::Skipped
        }
        _ => {
            client.upload_asset(&version, &platform, &artifact).await?;
            UploadOutcome::Uploaded
        }
    };

    // send_modify serializes increments, so observed counts are monotonic.
    progress.send_modify(|p| p.completed += 1);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_channel_explicit_config_wins() {
        assert_eq!(resolve_channel(Some("nightly"), "1.0.0-beta.1"), "nightly");
        assert_eq!(resolve_channel(Some("stable"), "0.1.0-alpha.3"), "stable");
    }

    #[test]
    fn test_resolve_channel_beta_substring() {
        assert_eq!(resolve_channel(None, "1.0.0-beta.1"), "beta");
    }

    #[test]
    fn test_resolve_channel_alpha_substring() {
        assert_eq!(resolve_channel(None, "0.3.0-alpha.2"), "alpha");
    }

    #[test]
    fn test_resolve_channel_beta_beats_alpha() {
        assert_eq!(resolve_channel(None, "1.0.0-beta.alpha"), "beta");
    }

    #[test]
    fn test_resolve_channel_default_stable() {
        assert_eq!(resolve_channel(None, "2.0.0"), "stable");
    }
}
