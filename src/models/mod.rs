/// Domain types shared across the provisioning workflow
use std::fmt;

/// Category of CloudFront managed policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Cache,
    OriginRequest,
    ResponseHeaders,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Cache => write!(f, "cache"),
            PolicyKind::OriginRequest => write!(f, "origin request"),
            PolicyKind::ResponseHeaders => write!(f, "response headers"),
        }
    }
}

/// A managed policy as returned by the directory listing.
#[derive(Debug, Clone)]
pub struct ManagedPolicy {
    pub id: String,
    pub name: String,
}

/// The four managed policy IDs every distribution build needs.
#[derive(Debug, Clone)]
pub struct ManagedPolicyIds {
    /// "Managed CORS with Preflight" response headers policy
    pub cors_with_preflight: String,
    /// "Managed-CachingDisabled" cache policy
    pub caching_disabled: String,
    /// "Managed-AllViewerExceptHostHeader" origin request policy
    pub all_viewer_except_host: String,
    /// "Managed-CachingOptimized" cache policy
    pub caching_optimized: String,
}

/// Certificate lifecycle state, reduced to what the workflow cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateStatus {
    Issued,
    Pending,
    Other,
}

/// One page of the certificate summary listing.
#[derive(Debug, Clone)]
pub struct CertificatePage {
    pub arns: Vec<String>,
    pub next_token: Option<String>,
}

/// Full detail of a certificate candidate, built from a describe call.
/// Lives only for the duration of one search.
#[derive(Debug, Clone)]
pub struct CertificateDetails {
    pub arn: String,
    pub domain_name: Option<String>,
    pub alternate_names: Vec<String>,
    pub status: CertificateStatus,
}

/// A located certificate: its ARN and lifecycle status. Whether it is usable
/// as a viewer certificate (status == Issued) is decided by the assembler.
#[derive(Debug, Clone)]
pub struct CertificateMatch {
    pub arn: String,
    pub status: CertificateStatus,
}

/// Where the distribution fronts its traffic. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginSource {
    /// S3 bucket, addressed virtual-hosted style.
    ObjectStorage { bucket: String },
    /// HTTP(S) origin reached over https-only on ports 80/443.
    Http { domain: String },
}

impl OriginSource {
    /// Stable origin ID referenced by every cache behavior.
    pub fn origin_id(&self) -> &'static str {
        match self {
            OriginSource::ObjectStorage { .. } => "S3Origin",
            OriginSource::Http { .. } => "HttpOrigin",
        }
    }

    /// Domain name CloudFront pulls from.
    pub fn domain_name(&self) -> String {
        match self {
            OriginSource::ObjectStorage { bucket } => format!("{}.s3.amazonaws.com", bucket),
            OriginSource::Http { domain } => domain.clone(),
        }
    }
}

/// An externally supplied path-pattern cache rule. Order is meaningful: it
/// becomes the behavior precedence in the published configuration.
#[derive(Debug, Clone, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheRule {
    pub path_pattern: String,
    pub cache: bool,
}
