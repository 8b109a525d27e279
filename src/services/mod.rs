pub mod assembler;
pub mod cache_rules;
pub mod certificate;
pub mod policy;
pub mod provisioner;
pub mod publisher;

pub use assembler::{assemble, AssembledDistribution};
pub use cache_rules::{CacheRuleSource, JsonFileRuleSource, NoCacheRules};
pub use certificate::CertificateLocator;
pub use policy::PolicyResolver;
pub use provisioner::Provisioner;
pub use publisher::DistributionPublisher;
