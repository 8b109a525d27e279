/// CloudFront-backed directory implementations
use crate::aws::{DistributionDirectory, PolicyDirectory, RemoteDistribution};
use crate::error::{AppError, Result};
use crate::models::{ManagedPolicy, PolicyKind};
use async_trait::async_trait;
use aws_sdk_cloudfront::types::{
    CachePolicyType, DistributionConfig, OriginRequestPolicyType, ResponseHeadersPolicyType,
};
use aws_sdk_cloudfront::Client;

/// Thin wrapper over the CloudFront client implementing the policy and
/// distribution directory traits.
pub struct CloudFrontDirectory {
    client: Client,
}

impl CloudFrontDirectory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PolicyDirectory for CloudFrontDirectory {
    async fn list_managed_policies(&self, kind: PolicyKind) -> Result<Vec<ManagedPolicy>> {
        match kind {
            PolicyKind::Cache => {
                let out = self
                    .client
                    .list_cache_policies()
                    .r#type(CachePolicyType::Managed)
                    .send()
                    .await
                    .map_err(|e| AppError::CloudFront(e.to_string()))?;

                let items = out
                    .cache_policy_list
                    .and_then(|list| list.items)
                    .unwrap_or_default();

                Ok(items
                    .into_iter()
                    .filter_map(|summary| {
                        let policy = summary.cache_policy?;
                        let name = policy.cache_policy_config.map(|c| c.name)?;
                        Some(ManagedPolicy {
                            id: policy.id,
                            name,
                        })
                    })
                    .collect())
            }
            PolicyKind::OriginRequest => {
                let out = self
                    .client
                    .list_origin_request_policies()
                    .r#type(OriginRequestPolicyType::Managed)
                    .send()
                    .await
                    .map_err(|e| AppError::CloudFront(e.to_string()))?;

                let items = out
                    .origin_request_policy_list
                    .and_then(|list| list.items)
                    .unwrap_or_default();

                Ok(items
                    .into_iter()
                    .filter_map(|summary| {
                        let policy = summary.origin_request_policy?;
                        let name = policy.origin_request_policy_config.map(|c| c.name)?;
                        Some(ManagedPolicy {
                            id: policy.id,
                            name,
                        })
                    })
                    .collect())
            }
            PolicyKind::ResponseHeaders => {
                let out = self
                    .client
                    .list_response_headers_policies()
                    .r#type(ResponseHeadersPolicyType::Managed)
                    .send()
                    .await
                    .map_err(|e| AppError::CloudFront(e.to_string()))?;

                let items = out
                    .response_headers_policy_list
                    .and_then(|list| list.items)
                    .unwrap_or_default();

                Ok(items
                    .into_iter()
                    .filter_map(|summary| {
                        let policy = summary.response_headers_policy?;
                        let name = policy.response_headers_policy_config.map(|c| c.name)?;
                        Some(ManagedPolicy {
                            id: policy.id,
                            name,
                        })
                    })
                    .collect())
            }
        }
    }
}

#[async_trait]
impl DistributionDirectory for CloudFrontDirectory {
    async fn fetch_config(&self, id: &str) -> Result<RemoteDistribution> {
        let out = self
            .client
            .get_distribution_config()
            .id(id)
            .send()
            .await
            .map_err(|e| AppError::CloudFront(e.to_string()))?;

        let config = out.distribution_config.ok_or_else(|| {
            AppError::CloudFront(format!("no configuration returned for distribution {}", id))
        })?;
        let etag = out
            .e_tag
            .ok_or_else(|| AppError::CloudFront(format!("no ETag returned for distribution {}", id)))?;

        Ok(RemoteDistribution { config, etag })
    }

    async fn create(&self, config: DistributionConfig) -> Result<Option<String>> {
        let out = self
            .client
            .create_distribution()
            .distribution_config(config)
            .send()
            .await
            .map_err(|e| AppError::CloudFront(e.to_string()))?;

        Ok(out.distribution.map(|d| d.id))
    }

    async fn update(
        &self,
        id: &str,
        config: DistributionConfig,
        etag: &str,
    ) -> Result<Option<String>> {
        let result = self
            .client
            .update_distribution()
            .id(id)
            .if_match(etag)
            .distribution_config(config)
            .send()
            .await;

        match result {
            Ok(out) => Ok(out.distribution.map(|d| d.id)),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_precondition_failed() {
                    Err(AppError::ConcurrentModification)
                } else {
                    Err(AppError::CloudFront(service_err.to_string()))
                }
            }
        }
    }
}
