/// Workflow orchestration
///
/// One invocation provisions one distribution: resolve the managed policies
/// and the certificate concurrently, gather the extra cache rules, assemble
/// the configuration, then create or update. All-or-nothing: either a
/// distribution ID comes back or the run fails with nothing published.
use crate::aws::{CertificateDirectory, DistributionDirectory, PolicyDirectory};
use crate::config::Config;
use crate::error::Result;
use crate::services::assembler::assemble;
use crate::services::cache_rules::CacheRuleSource;
use crate::services::certificate::CertificateLocator;
use crate::services::policy::PolicyResolver;
use crate::services::publisher::DistributionPublisher;
use std::sync::Arc;

pub struct Provisioner {
    policies: Arc<dyn PolicyDirectory>,
    certificates: Arc<dyn CertificateDirectory>,
    distributions: Arc<dyn DistributionDirectory>,
    cache_rules: Box<dyn CacheRuleSource>,
}

impl Provisioner {
    pub fn new(
        policies: Arc<dyn PolicyDirectory>,
        certificates: Arc<dyn CertificateDirectory>,
        distributions: Arc<dyn DistributionDirectory>,
        cache_rules: Box<dyn CacheRuleSource>,
    ) -> Self {
        Self {
            policies,
            certificates,
            distributions,
            cache_rules,
        }
    }

    /// Run the workflow; returns the distribution ID on success.
    pub async fn run(&self, config: &Config) -> Result<String> {
        // Local input, checked before any network call.
        let rules = self.cache_rules.rules()?;

        let resolver = PolicyResolver::new(self.policies.clone());
        let locator = CertificateLocator::new(self.certificates.clone());
        let certificate_name = config.certificate_name.as_deref().unwrap_or("");

        // Independent lookups, fail-fast.
        let (policy_ids, certificate) = tokio::try_join!(
            resolver.resolve_required(),
            locator.find(certificate_name),
        )?;

        let assembled = assemble(
            &config.origin,
            &policy_ids,
            certificate.as_ref(),
            &config.alternate_domain_names,
            &rules,
        )?;

        DistributionPublisher::new(self.distributions.clone())
            .publish(assembled, config.distribution_id.as_deref())
            .await
    }
}
