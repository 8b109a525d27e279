/// Remote directory-service interfaces
///
/// The provisioning workflow talks to CloudFront and ACM through these traits
/// so the resolution and publishing logic can be exercised against in-memory
/// fakes. Production implementations are thin wrappers over the AWS SDK
/// clients.
use crate::error::Result;
use crate::models::{CertificateDetails, CertificatePage, ManagedPolicy, PolicyKind};
use async_trait::async_trait;
use aws_sdk_cloudfront::types::DistributionConfig;

pub mod acm;
pub mod cloudfront;

pub use acm::AcmDirectory;
pub use cloudfront::CloudFrontDirectory;

/// A remote distribution configuration together with the ETag concurrency
/// token it was read under. The token must accompany the next write.
#[derive(Debug, Clone)]
pub struct RemoteDistribution {
    pub config: DistributionConfig,
    pub etag: String,
}

/// Listing of platform-managed policies.
#[async_trait]
pub trait PolicyDirectory: Send + Sync {
    /// List the managed policies of one kind. The managed set is small and
    /// platform-curated; a single page is sufficient.
    async fn list_managed_policies(&self, kind: PolicyKind) -> Result<Vec<ManagedPolicy>>;
}

/// Certificate summary listing and per-candidate detail lookup.
#[async_trait]
pub trait CertificateDirectory: Send + Sync {
    /// Fetch one page of certificate summaries, following `next_token`.
    async fn list_certificates(&self, next_token: Option<String>) -> Result<CertificatePage>;

    /// Fetch the full detail (primary name, SANs, status) of one candidate.
    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetails>;
}

/// Distribution read/create/update operations.
#[async_trait]
pub trait DistributionDirectory: Send + Sync {
    /// Read the current remote configuration and its concurrency token.
    async fn fetch_config(&self, id: &str) -> Result<RemoteDistribution>;

    /// Create a new distribution; returns its ID when the remote reports one.
    async fn create(&self, config: DistributionConfig) -> Result<Option<String>>;

    /// Update an existing distribution under the given concurrency token.
    async fn update(
        &self,
        id: &str,
        config: DistributionConfig,
        etag: &str,
    ) -> Result<Option<String>>;
}
