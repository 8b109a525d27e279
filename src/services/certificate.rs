/// Certificate location by domain name
///
/// Two-pass search over ACM. Pass 1 pages the summary listing to exhaustion
/// and keeps every ARN: summaries expose only the primary domain, so
/// filtering on it would miss certificates that match on an alternate name.
/// Pass 2 probes each candidate's detail in enumeration order and returns the
/// first one whose name set covers the target.
use crate::aws::CertificateDirectory;
use crate::error::Result;
use crate::matching::domain_matches;
use crate::models::CertificateMatch;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CertificateLocator {
    directory: Arc<dyn CertificateDirectory>,
}

impl CertificateLocator {
    pub fn new(directory: Arc<dyn CertificateDirectory>) -> Self {
        Self { directory }
    }

    /// Find a certificate covering `target`.
    ///
    /// `Ok(None)` means "use the default viewer certificate" and is returned
    /// for an empty target (no API calls), and when no candidate matches.
    /// The first matching candidate wins regardless of its lifecycle status;
    /// a failed detail probe only skips that candidate.
    pub async fn find(&self, target: &str) -> Result<Option<CertificateMatch>> {
        if target.is_empty() {
            return Ok(None);
        }

        // Pass 1: enumerate every candidate ARN.
        let mut candidates = Vec::new();
        let mut next_token = None;
        loop {
            let page = self.directory.list_certificates(next_token).await?;
            candidates.extend(page.arns);
            next_token = page.next_token;
            if next_token.is_none() {
                break;
            }
        }
        debug!(domain = target, candidates = candidates.len(), "enumerated certificate candidates");

        // Pass 2: probe each candidate in enumeration order.
        for arn in candidates {
            let details = match self.directory.describe_certificate(&arn).await {
                Ok(details) => details,
                Err(err) => {
                    warn!(certificate = %arn, error = %err, "skipping candidate: describe failed");
                    continue;
                }
            };

            let matched = details
                .domain_name
                .iter()
                .chain(details.alternate_names.iter())
                .any(|name| domain_matches(target, name));

            if matched {
                debug!(certificate = %details.arn, status = ?details.status, "certificate matched");
                return Ok(Some(CertificateMatch {
                    arn: details.arn,
                    status: details.status,
                }));
            }
        }

        Ok(None)
    }
}
