/// Managed policy resolution
///
/// CloudFront managed policies are addressed by stable human names but
/// consumed by opaque IDs. The resolver lists the managed set for a category
/// and matches on normalized names, so hyphenated and spaced spellings of the
/// same policy resolve identically.
use crate::aws::PolicyDirectory;
use crate::error::{AppError, Result};
use crate::matching::normalize_name;
use crate::models::{ManagedPolicyIds, PolicyKind};
use std::sync::Arc;
use tracing::debug;

/// Response headers policy applied to every behavior.
pub const CORS_WITH_PREFLIGHT: &str = "Managed CORS with Preflight";
/// Cache policy for dynamic traffic (default behavior, uncached rules).
pub const CACHING_DISABLED: &str = "Managed-CachingDisabled";
/// Cache policy for cached path patterns.
pub const CACHING_OPTIMIZED: &str = "Managed-CachingOptimized";
/// Origin request policy forwarding everything except the Host header.
pub const ALL_VIEWER_EXCEPT_HOST: &str = "Managed-AllViewerExceptHostHeader";

pub struct PolicyResolver {
    directory: Arc<dyn PolicyDirectory>,
}

impl PolicyResolver {
    pub fn new(directory: Arc<dyn PolicyDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve one managed policy ID by category and name.
    pub async fn resolve(&self, kind: PolicyKind, name: &str) -> Result<String> {
        let target = normalize_name(name);
        let policies = self.directory.list_managed_policies(kind).await?;

        let id = policies
            .into_iter()
            .find(|policy| normalize_name(&policy.name) == target)
            .map(|policy| policy.id)
            .ok_or_else(|| AppError::PolicyNotFound {
                kind,
                name: name.to_string(),
            })?;

        debug!(%kind, name, id = %id, "resolved managed policy");
        Ok(id)
    }

    /// Resolve the four policies every distribution build needs.
    ///
    /// The lookups are independent and issued concurrently; if any fails the
    /// run aborts before any create/update call is made.
    pub async fn resolve_required(&self) -> Result<ManagedPolicyIds> {
        let (cors_with_preflight, caching_disabled, all_viewer_except_host, caching_optimized) =
            tokio::try_join!(
                self.resolve(PolicyKind::ResponseHeaders, CORS_WITH_PREFLIGHT),
                self.resolve(PolicyKind::Cache, CACHING_DISABLED),
                self.resolve(PolicyKind::OriginRequest, ALL_VIEWER_EXCEPT_HOST),
                self.resolve(PolicyKind::Cache, CACHING_OPTIMIZED),
            )?;

        Ok(ManagedPolicyIds {
            cors_with_preflight,
            caching_disabled,
            all_viewer_except_host,
            caching_optimized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ManagedPolicy;
    use async_trait::async_trait;

    struct FakePolicies {
        cache: Vec<ManagedPolicy>,
        origin_request: Vec<ManagedPolicy>,
        response_headers: Vec<ManagedPolicy>,
    }

    #[async_trait]
    impl PolicyDirectory for FakePolicies {
        async fn list_managed_policies(&self, kind: PolicyKind) -> Result<Vec<ManagedPolicy>> {
            Ok(match kind {
                PolicyKind::Cache => self.cache.clone(),
                PolicyKind::OriginRequest => self.origin_request.clone(),
                PolicyKind::ResponseHeaders => self.response_headers.clone(),
            })
        }
    }

    fn policy(id: &str, name: &str) -> ManagedPolicy {
        ManagedPolicy {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn fake() -> FakePolicies {
        FakePolicies {
            cache: vec![
                policy("cp-disabled", "Managed-CachingDisabled"),
                policy("cp-optimized", "Managed-CachingOptimized"),
            ],
            origin_request: vec![policy("orp-1", "Managed-AllViewerExceptHostHeader")],
            response_headers: vec![policy("rhp-1", "Managed-CORS-With-Preflight")],
        }
    }

    #[tokio::test]
    async fn resolves_despite_separator_and_case_differences() {
        let resolver = PolicyResolver::new(Arc::new(fake()));

        // The listing spells it with hyphens; the lookup uses spaces.
        let id = resolver
            .resolve(PolicyKind::ResponseHeaders, "Managed CORS with Preflight")
            .await
            .unwrap();
        assert_eq!(id, "rhp-1");

        let id = resolver
            .resolve(PolicyKind::Cache, "managed caching disabled")
            .await
            .unwrap();
        assert_eq!(id, "cp-disabled");
    }

    #[tokio::test]
    async fn missing_policy_is_fatal() {
        let resolver = PolicyResolver::new(Arc::new(fake()));

        let err = resolver
            .resolve(PolicyKind::Cache, "Managed-NoSuchPolicy")
            .await
            .unwrap_err();
        match err {
            AppError::PolicyNotFound { kind, name } => {
                assert_eq!(kind, PolicyKind::Cache);
                assert_eq!(name, "Managed-NoSuchPolicy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn resolves_all_four_required_policies() {
        let resolver = PolicyResolver::new(Arc::new(fake()));

        let ids = resolver.resolve_required().await.unwrap();
        assert_eq!(ids.cors_with_preflight, "rhp-1");
        assert_eq!(ids.caching_disabled, "cp-disabled");
        assert_eq!(ids.all_viewer_except_host, "orp-1");
        assert_eq!(ids.caching_optimized, "cp-optimized");
    }

    #[tokio::test]
    async fn resolve_required_fails_fast_when_one_is_missing() {
        let mut directory = fake();
        directory.origin_request.clear();
        let resolver = PolicyResolver::new(Arc::new(directory));

        let err = resolver.resolve_required().await.unwrap_err();
        assert!(matches!(err, AppError::PolicyNotFound { .. }));
    }
}
