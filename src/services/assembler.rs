/// Distribution configuration assembly
///
/// Composes the origin, the default cache behavior, the extra path-pattern
/// behaviors, the alias list, and the viewer-certificate block into one
/// `AssembledDistribution`. The publisher turns that into either a full
/// create payload (with a fresh caller reference) or a non-destructive
/// overlay onto the remote configuration.
use crate::error::Result;
use crate::models::{CacheRule, CertificateMatch, CertificateStatus, ManagedPolicyIds, OriginSource};
use aws_sdk_cloudfront::types::{
    Aliases, AllowedMethods, CacheBehavior, CacheBehaviors, CachedMethods, CustomOriginConfig,
    DefaultCacheBehavior, DistributionConfig, Method, MinimumProtocolVersion, Origin,
    OriginProtocolPolicy, Origins, S3OriginConfig, SslSupportMethod, ViewerCertificate,
    ViewerProtocolPolicy,
};
use chrono::Utc;
use tracing::{info, warn};

/// The configuration fields this tool owns. Everything else on an existing
/// distribution passes through updates untouched.
#[derive(Debug, Clone)]
pub struct AssembledDistribution {
    pub origins: Origins,
    pub default_behavior: DefaultCacheBehavior,
    pub cache_behaviors: CacheBehaviors,
    pub viewer_certificate: ViewerCertificate,
    /// `Some` attaches (or clears) the alias list; `None` leaves any remote
    /// aliases alone. Default-certificate configs always force `Some(empty)`:
    /// the remote rejects aliases paired with the default certificate.
    pub aliases: Option<Aliases>,
    pub comment: String,
    pub default_root_object: Option<String>,
}

impl AssembledDistribution {
    /// Build the create payload. The caller reference is derived from the
    /// current time and only ever set here; updates keep the remote's.
    pub fn into_create_config(self) -> Result<DistributionConfig> {
        let caller_reference = Utc::now().timestamp_millis().to_string();

        let config = DistributionConfig::builder()
            .caller_reference(caller_reference)
            .origins(self.origins)
            .default_cache_behavior(self.default_behavior)
            .cache_behaviors(self.cache_behaviors)
            .viewer_certificate(self.viewer_certificate)
            .set_aliases(self.aliases)
            .comment(self.comment)
            .set_default_root_object(self.default_root_object)
            .enabled(true)
            .build()?;

        Ok(config)
    }

    /// Overlay the assembled fields onto a fetched remote configuration.
    ///
    /// Only the fields this tool owns are replaced; the rest of the remote
    /// configuration passes through unmodified, including the caller
    /// reference, which the remote rejects changes to.
    pub fn overlay_onto(self, mut remote: DistributionConfig) -> DistributionConfig {
        remote.origins = Some(self.origins);
        remote.default_cache_behavior = Some(self.default_behavior);
        remote.cache_behaviors = Some(self.cache_behaviors);
        remote.viewer_certificate = Some(self.viewer_certificate);
        if let Some(aliases) = self.aliases {
            remote.aliases = Some(aliases);
        }
        remote.comment = self.comment;
        remote.default_root_object = self.default_root_object;
        remote.enabled = true;
        remote
    }
}

/// Compose a distribution model from the resolved inputs.
pub fn assemble(
    origin: &OriginSource,
    policies: &ManagedPolicyIds,
    certificate: Option<&CertificateMatch>,
    requested_aliases: &[String],
    rules: &[CacheRule],
) -> Result<AssembledDistribution> {
    let origin_id = origin.origin_id();

    // The default behavior fronts dynamic traffic: every HTTP method, caching
    // disabled, all viewer headers except Host forwarded to the origin.
    let default_behavior = DefaultCacheBehavior::builder()
        .target_origin_id(origin_id)
        .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
        .allowed_methods(allowed_methods(all_methods(), read_methods())?)
        .cache_policy_id(&policies.caching_disabled)
        .origin_request_policy_id(&policies.all_viewer_except_host)
        .response_headers_policy_id(&policies.cors_with_preflight)
        .build()?;

    // One behavior per rule, in rule order: the remote evaluates path
    // patterns by list position, first match wins.
    let mut behaviors = Vec::with_capacity(rules.len());
    for rule in rules {
        let cache_policy_id = if rule.cache {
            &policies.caching_optimized
        } else {
            &policies.caching_disabled
        };
        behaviors.push(
            CacheBehavior::builder()
                .path_pattern(&rule.path_pattern)
                .target_origin_id(origin_id)
                .viewer_protocol_policy(ViewerProtocolPolicy::RedirectToHttps)
                .allowed_methods(allowed_methods(read_methods(), read_methods())?)
                .cache_policy_id(cache_policy_id)
                .origin_request_policy_id(&policies.all_viewer_except_host)
                .response_headers_policy_id(&policies.cors_with_preflight)
                .build()?,
        );
    }
    let cache_behaviors = CacheBehaviors::builder()
        .quantity(behaviors.len() as i32)
        .set_items(Some(behaviors))
        .build()?;

    let usable_certificate = certificate.filter(|cert| cert.status == CertificateStatus::Issued);
    let (viewer_certificate, aliases) = match usable_certificate {
        Some(cert) => {
            info!(certificate = %cert.arn, "using custom viewer certificate");
            let viewer_certificate = ViewerCertificate::builder()
                .acm_certificate_arn(&cert.arn)
                .ssl_support_method(SslSupportMethod::SniOnly)
                .minimum_protocol_version(MinimumProtocolVersion::TlSv122019)
                .build();
            let aliases = if requested_aliases.is_empty() {
                None
            } else {
                Some(build_aliases(requested_aliases)?)
            };
            (viewer_certificate, aliases)
        }
        None => {
            match certificate {
                Some(cert) => warn!(
                    certificate = %cert.arn,
                    status = ?cert.status,
                    "certificate found but not issued; falling back to the default viewer certificate"
                ),
                None => info!("using default CloudFront viewer certificate"),
            }
            let viewer_certificate = ViewerCertificate::builder()
                .cloud_front_default_certificate(true)
                .build();
            // Aliases are invalid with the default certificate; force empty
            // even when some were requested.
            (viewer_certificate, Some(build_aliases(&[])?))
        }
    };

    let (flavor, default_root_object) = match origin {
        OriginSource::ObjectStorage { bucket } => {
            info!(bucket = %bucket, "configuring S3 origin");
            ("S3", Some("index.html".to_string()))
        }
        OriginSource::Http { domain } => {
            info!(domain = %domain, "configuring HTTP origin");
            ("HTTP", None)
        }
    };

    Ok(AssembledDistribution {
        origins: Origins::builder()
            .quantity(1)
            .items(build_origin(origin)?)
            .build()?,
        default_behavior,
        cache_behaviors,
        viewer_certificate,
        aliases,
        comment: format!("Provisioned CDN distribution for {} origin", flavor),
        default_root_object,
    })
}

fn build_origin(source: &OriginSource) -> Result<Origin> {
    let builder = Origin::builder()
        .id(source.origin_id())
        .domain_name(source.domain_name());

    let origin = match source {
        OriginSource::ObjectStorage { .. } => builder
            .s3_origin_config(
                // Public bucket or OAC managed elsewhere.
                S3OriginConfig::builder().origin_access_identity("").build(),
            )
            .build()?,
        OriginSource::Http { .. } => builder
            .custom_origin_config(
                CustomOriginConfig::builder()
                    .origin_protocol_policy(OriginProtocolPolicy::HttpsOnly)
                    .http_port(80)
                    .https_port(443)
                    .build()?,
            )
            .build()?,
    };

    Ok(origin)
}

fn all_methods() -> Vec<Method> {
    vec![
        Method::Get,
        Method::Head,
        Method::Options,
        Method::Put,
        Method::Post,
        Method::Patch,
        Method::Delete,
    ]
}

fn read_methods() -> Vec<Method> {
    vec![Method::Get, Method::Head, Method::Options]
}

fn allowed_methods(items: Vec<Method>, cached: Vec<Method>) -> Result<AllowedMethods> {
    let allowed = AllowedMethods::builder()
        .quantity(items.len() as i32)
        .set_items(Some(items))
        .cached_methods(
            CachedMethods::builder()
                .quantity(cached.len() as i32)
                .set_items(Some(cached))
                .build()?,
        )
        .build()?;
    Ok(allowed)
}

fn build_aliases(items: &[String]) -> Result<Aliases> {
    let aliases = Aliases::builder()
        .quantity(items.len() as i32)
        .set_items(Some(items.to_vec()))
        .build()?;
    Ok(aliases)
}
