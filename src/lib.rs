//! CDN distribution provisioner
//!
//! Provisions or updates a CloudFront distribution in front of an S3 or
//! HTTP(S) origin. Managed policy IDs and the ACM certificate are resolved by
//! human-readable name, the distribution configuration is assembled from the
//! environment plus an optional cache-rule file, and the result is either
//! created fresh or merged non-destructively into the existing remote
//! configuration under its ETag concurrency token.

pub mod aws;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
