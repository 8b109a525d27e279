/// ACM-backed certificate directory
use crate::aws::CertificateDirectory;
use crate::error::{AppError, Result};
use crate::models::{CertificateDetails, CertificatePage, CertificateStatus};
use async_trait::async_trait;
use aws_sdk_acm::types::CertificateStatus as AcmCertificateStatus;
use aws_sdk_acm::Client;

/// Thin wrapper over the ACM client.
pub struct AcmDirectory {
    client: Client,
}

impl AcmDirectory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CertificateDirectory for AcmDirectory {
    async fn list_certificates(&self, next_token: Option<String>) -> Result<CertificatePage> {
        let out = self
            .client
            .list_certificates()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| AppError::Acm(e.to_string()))?;

        let arns = out
            .certificate_summary_list
            .unwrap_or_default()
            .into_iter()
            .filter_map(|summary| summary.certificate_arn)
            .collect();

        Ok(CertificatePage {
            arns,
            next_token: out.next_token,
        })
    }

    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetails> {
        let out = self
            .client
            .describe_certificate()
            .certificate_arn(arn)
            .send()
            .await
            .map_err(|e| AppError::Acm(e.to_string()))?;

        let cert = out
            .certificate
            .ok_or_else(|| AppError::Acm(format!("no detail returned for certificate {}", arn)))?;

        Ok(CertificateDetails {
            arn: cert.certificate_arn.unwrap_or_else(|| arn.to_string()),
            domain_name: cert.domain_name,
            alternate_names: cert.subject_alternative_names.unwrap_or_default(),
            status: match cert.status {
                Some(AcmCertificateStatus::Issued) => CertificateStatus::Issued,
                Some(AcmCertificateStatus::PendingValidation) => CertificateStatus::Pending,
                _ => CertificateStatus::Other,
            },
        })
    }
}
