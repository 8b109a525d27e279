/// Distribution publishing
///
/// Two terminal paths, selected by the presence of an existing distribution
/// ID. Create submits the assembled configuration as-is. Update is a
/// read-modify-write under the remote ETag: the assembled fields are overlaid
/// onto the freshly fetched remote configuration and submitted with the token
/// it was read under. A stale token is surfaced as a fatal error, never
/// retried: a silent retry could clobber an interleaved change.
use crate::aws::DistributionDirectory;
use crate::error::{AppError, Result};
use crate::services::assembler::AssembledDistribution;
use std::sync::Arc;
use tracing::info;

pub struct DistributionPublisher {
    directory: Arc<dyn DistributionDirectory>,
}

impl DistributionPublisher {
    pub fn new(directory: Arc<dyn DistributionDirectory>) -> Self {
        Self { directory }
    }

    /// Publish the assembled configuration; returns the distribution ID.
    pub async fn publish(
        &self,
        assembled: AssembledDistribution,
        existing_id: Option<&str>,
    ) -> Result<String> {
        match existing_id {
            Some(id) => self.update(assembled, id).await,
            None => self.create(assembled).await,
        }
    }

    async fn create(&self, assembled: AssembledDistribution) -> Result<String> {
        info!("creating new distribution");
        let config = assembled.into_create_config()?;
        self.directory
            .create(config)
            .await?
            .ok_or(AppError::PublishFailed("create"))
    }

    async fn update(&self, assembled: AssembledDistribution, id: &str) -> Result<String> {
        info!(distribution = %id, "updating existing distribution");
        let remote = self.directory.fetch_config(id).await?;
        let merged = assembled.overlay_onto(remote.config);
        self.directory
            .update(id, merged, &remote.etag)
            .await?
            .ok_or(AppError::PublishFailed("update"))
    }
}
