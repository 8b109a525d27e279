/// Error types for the provisioning workflow
///
/// Every fatal error unwinds to main, is logged with context, and terminates
/// the process with a non-zero status. Certificate probe failures are the one
/// recovered case and are handled inside the locator, not modeled here.
use crate::models::PolicyKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Managed {kind} policy not found: {name}")]
    PolicyNotFound { kind: PolicyKind, name: String },

    #[error("Failed to {0} CloudFront distribution: no distribution in response")]
    PublishFailed(&'static str),

    #[error("Distribution was modified concurrently (stale ETag); re-run against the latest remote state")]
    ConcurrentModification,

    #[error("CloudFront error: {0}")]
    CloudFront(String),

    #[error("ACM error: {0}")]
    Acm(String),

    #[error("Invalid distribution config: {0}")]
    InvalidConfig(#[from] aws_smithy_types::error::operation::BuildError),
}
