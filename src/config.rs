/// Configuration management for cdn-provisioner
///
/// Loads configuration from environment variables. Values are trimmed and
/// empty strings are treated as absent, so `CERTIFICATE_NAME=` behaves like an
/// unset variable.
use crate::error::{AppError, Result};
use crate::models::OriginSource;
use std::path::PathBuf;

/// CloudFront's control plane (and the ACM certificates it accepts) live in
/// us-east-1 regardless of where the origin is.
pub const CONTROL_PLANE_REGION: &str = "us-east-1";

const DEFAULT_CACHE_RULES_PATH: &str = "caching.config.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Exactly one origin per run; bucket takes precedence when both are set.
    pub origin: OriginSource,
    /// Domain used to locate an ACM certificate; absent means the default
    /// CloudFront certificate is used.
    pub certificate_name: Option<String>,
    /// Existing distribution ID; presence selects the update path.
    pub distribution_id: Option<String>,
    /// Requested aliases (CNAMEs); dropped if no usable custom certificate.
    pub alternate_domain_names: Vec<String>,
    /// Optional JSON file with extra path-pattern cache rules.
    pub cache_rules_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails with a `Config` error when neither `AWS_BUCKET` nor an origin
    /// domain is set, before any network call is made.
    pub fn from_env() -> Result<Self> {
        let bucket = get_env("AWS_BUCKET");
        let origin_domain = get_env("ORIGIN_DOMAIN_NAME").or_else(|| get_env("CF_ORIGIN_DOMAIN_NAME"));
        let origin = select_origin(bucket, origin_domain)?;

        Ok(Config {
            origin,
            certificate_name: get_env("CERTIFICATE_NAME"),
            distribution_id: get_env("CLOUDFRONT_DISTRIBUTION_ID"),
            alternate_domain_names: get_env("ALTERNATE_DOMAIN_NAMES")
                .map(|v| parse_domain_list(&v))
                .unwrap_or_default(),
            cache_rules_path: get_env("CACHE_RULES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_RULES_PATH)),
        })
    }
}

/// Pick the single origin source. The bucket takes precedence when both are
/// configured; neither is a fatal configuration error raised before any
/// network call.
fn select_origin(bucket: Option<String>, origin_domain: Option<String>) -> Result<OriginSource> {
    match (bucket, origin_domain) {
        (Some(bucket), _) => Ok(OriginSource::ObjectStorage { bucket }),
        (None, Some(domain)) => Ok(OriginSource::Http { domain }),
        (None, None) => Err(AppError::Config(
            "missing either AWS_BUCKET or ORIGIN_DOMAIN_NAME/CF_ORIGIN_DOMAIN_NAME".into(),
        )),
    }
}

/// Read an environment variable, trimming whitespace and mapping empty values
/// to `None`.
fn get_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated domain list, dropping empty entries.
fn parse_domain_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
