//! End-to-end provisioning flows against in-memory directory fakes.
//!
//! Scenario A: S3 bucket only, no certificate, no existing distribution, no
//! extra rules — create path with the default viewer certificate.
//!
//! Scenario B: HTTP origin, certificate located through a wildcard SAN,
//! aliases, existing distribution — update path with a custom certificate and
//! the remote caller reference preserved.

use async_trait::async_trait;
use aws_sdk_cloudfront::types::{
    DefaultCacheBehavior, DistributionConfig, Origin, Origins, ViewerProtocolPolicy,
};
use cdn_provisioner::aws::{
    CertificateDirectory, DistributionDirectory, PolicyDirectory, RemoteDistribution,
};
use cdn_provisioner::models::{
    CertificateDetails, CertificatePage, CertificateStatus, ManagedPolicy, OriginSource,
    PolicyKind,
};
use cdn_provisioner::services::{NoCacheRules, Provisioner};
use cdn_provisioner::{Config, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

struct FakePolicies;

#[async_trait]
impl PolicyDirectory for FakePolicies {
    async fn list_managed_policies(&self, kind: PolicyKind) -> Result<Vec<ManagedPolicy>> {
        let policies = match kind {
            PolicyKind::Cache => vec![
                ("cp-disabled", "Managed-CachingDisabled"),
                ("cp-optimized", "Managed-CachingOptimized"),
            ],
            PolicyKind::OriginRequest => vec![("orp-1", "Managed-AllViewerExceptHostHeader")],
            PolicyKind::ResponseHeaders => vec![("rhp-1", "Managed-CORS-With-Preflight")],
        };
        Ok(policies
            .into_iter()
            .map(|(id, name)| ManagedPolicy {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect())
    }
}

struct FakeCertificates {
    candidates: Vec<CertificateDetails>,
    list_calls: Mutex<u32>,
}

impl FakeCertificates {
    fn new(candidates: Vec<CertificateDetails>) -> Self {
        Self {
            candidates,
            list_calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl CertificateDirectory for FakeCertificates {
    async fn list_certificates(&self, _next_token: Option<String>) -> Result<CertificatePage> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(CertificatePage {
            arns: self.candidates.iter().map(|c| c.arn.clone()).collect(),
            next_token: None,
        })
    }

    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetails> {
        Ok(self
            .candidates
            .iter()
            .find(|c| c.arn == arn)
            .cloned()
            .expect("unknown candidate"))
    }
}

#[derive(Default)]
struct FakeDistributions {
    remote: Option<RemoteDistribution>,
    created: Mutex<Option<DistributionConfig>>,
    updated: Mutex<Option<(String, DistributionConfig, String)>>,
}

#[async_trait]
impl DistributionDirectory for FakeDistributions {
    async fn fetch_config(&self, _id: &str) -> Result<RemoteDistribution> {
        Ok(self.remote.clone().expect("no remote configured"))
    }

    async fn create(&self, config: DistributionConfig) -> Result<Option<String>> {
        *self.created.lock().unwrap() = Some(config);
        Ok(Some("E1NEW".to_string()))
    }

    async fn update(
        &self,
        id: &str,
        config: DistributionConfig,
        etag: &str,
    ) -> Result<Option<String>> {
        *self.updated.lock().unwrap() = Some((id.to_string(), config, etag.to_string()));
        Ok(Some(id.to_string()))
    }
}

fn config(origin: OriginSource) -> Config {
    Config {
        origin,
        certificate_name: None,
        distribution_id: None,
        alternate_domain_names: Vec::new(),
        cache_rules_path: PathBuf::from("/nonexistent/caching.config.json"),
    }
}

#[tokio::test]
async fn scenario_a_bucket_only_creates_with_default_certificate() {
    let certificates = Arc::new(FakeCertificates::new(vec![]));
    let distributions = Arc::new(FakeDistributions::default());
    let provisioner = Provisioner::new(
        Arc::new(FakePolicies),
        certificates.clone(),
        distributions.clone(),
        Box::new(NoCacheRules),
    );

    let cfg = config(OriginSource::ObjectStorage {
        bucket: "my-bucket".to_string(),
    });
    let id = provisioner.run(&cfg).await.unwrap();
    assert_eq!(id, "E1NEW");

    // No certificate name: the certificate directory is never consulted.
    assert_eq!(*certificates.list_calls.lock().unwrap(), 0);

    let created = distributions.created.lock().unwrap();
    let config = created.as_ref().unwrap();
    assert!(!config.caller_reference.is_empty());

    let origins = config.origins.as_ref().unwrap();
    assert_eq!(origins.quantity, 1);
    assert_eq!(origins.items[0].id, "S3Origin");
    assert_eq!(origins.items[0].domain_name, "my-bucket.s3.amazonaws.com");
    assert!(origins.items[0].s3_origin_config.is_some());

    let default_behavior = config.default_cache_behavior.as_ref().unwrap();
    assert_eq!(default_behavior.cache_policy_id.as_deref(), Some("cp-disabled"));

    // Default behavior only.
    assert_eq!(config.cache_behaviors.as_ref().unwrap().quantity, 0);

    let vc = config.viewer_certificate.as_ref().unwrap();
    assert_eq!(vc.cloud_front_default_certificate, Some(true));
    assert_eq!(config.aliases.as_ref().unwrap().quantity, 0);
}

#[tokio::test]
async fn scenario_b_http_origin_updates_with_custom_certificate() {
    let certificates = Arc::new(FakeCertificates::new(vec![
        CertificateDetails {
            arn: "arn:aws:acm:us-east-1:123:certificate/other".to_string(),
            domain_name: Some("unrelated.org".to_string()),
            alternate_names: vec![],
            status: CertificateStatus::Issued,
        },
        CertificateDetails {
            arn: "arn:aws:acm:us-east-1:123:certificate/match".to_string(),
            domain_name: Some("something-else.net".to_string()),
            alternate_names: vec!["*.example.com".to_string()],
            status: CertificateStatus::Issued,
        },
    ]));

    let remote = RemoteDistribution {
        config: DistributionConfig::builder()
            .caller_reference("original-ref")
            .origins(
                Origins::builder()
                    .quantity(1)
                    .items(
                        Origin::builder()
                            .id("OldOrigin")
                            .domain_name("old.example.com")
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .default_cache_behavior(
                DefaultCacheBehavior::builder()
                    .target_origin_id("OldOrigin")
                    .viewer_protocol_policy(ViewerProtocolPolicy::AllowAll)
                    .build()
                    .unwrap(),
            )
            .comment("existing")
            .enabled(true)
            .web_acl_id("acl-999")
            .build()
            .unwrap(),
        etag: "ETAG777".to_string(),
    };
    let distributions = Arc::new(FakeDistributions {
        remote: Some(remote),
        ..FakeDistributions::default()
    });

    let provisioner = Provisioner::new(
        Arc::new(FakePolicies),
        certificates,
        distributions.clone(),
        Box::new(NoCacheRules),
    );

    let mut cfg = config(OriginSource::Http {
        domain: "origin.example.com".to_string(),
    });
    cfg.certificate_name = Some("example.com".to_string());
    cfg.alternate_domain_names = vec!["www.example.com".to_string()];
    cfg.distribution_id = Some("E1EXISTING".to_string());

    let id = provisioner.run(&cfg).await.unwrap();
    assert_eq!(id, "E1EXISTING");

    let updated = distributions.updated.lock().unwrap();
    let (id, config, etag) = updated.as_ref().unwrap();
    assert_eq!(id, "E1EXISTING");
    assert_eq!(etag, "ETAG777");

    // Caller reference preserved from the fetched remote configuration.
    assert_eq!(config.caller_reference, "original-ref");
    // Unrelated remote fields pass through the merge.
    assert_eq!(config.web_acl_id.as_deref(), Some("acl-999"));

    let origins = config.origins.as_ref().unwrap();
    assert_eq!(origins.items[0].id, "HttpOrigin");
    assert_eq!(origins.items[0].domain_name, "origin.example.com");
    assert!(origins.items[0].custom_origin_config.is_some());

    let vc = config.viewer_certificate.as_ref().unwrap();
    assert_eq!(
        vc.acm_certificate_arn.as_deref(),
        Some("arn:aws:acm:us-east-1:123:certificate/match")
    );

    let aliases = config.aliases.as_ref().unwrap();
    assert_eq!(aliases.quantity, 1);
    assert_eq!(
        aliases.items.as_deref(),
        Some(&["www.example.com".to_string()][..])
    );
}
