/// Cache rule sources
///
/// Extra path-pattern behaviors are supplied by a collaborator behind the
/// `CacheRuleSource` trait; the core never depends on how the list is
/// produced. The production source reads an optional JSON file shaped like
/// `[{"pathPattern": "/static/*", "cache": true}, ...]` whose order is the
/// behavior precedence.
use crate::error::{AppError, Result};
use crate::models::CacheRule;
use std::path::PathBuf;
use tracing::debug;

pub trait CacheRuleSource: Send + Sync {
    /// Ordered list of extra cache rules; may be empty.
    fn rules(&self) -> Result<Vec<CacheRule>>;
}

/// Rule source backed by an optional JSON file. A missing file yields zero
/// rules; an unreadable or malformed file is a configuration error.
pub struct JsonFileRuleSource {
    path: PathBuf,
}

impl JsonFileRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CacheRuleSource for JsonFileRuleSource {
    fn rules(&self) -> Result<Vec<CacheRule>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cache rule file, no extra behaviors");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(AppError::Config(format!(
                    "failed to read cache rules {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|err| {
            AppError::Config(format!(
                "invalid cache rule file {}: {}",
                self.path.display(),
                err
            ))
        })
    }
}

/// Source with no extra rules.
pub struct NoCacheRules;

impl CacheRuleSource for NoCacheRules {
    fn rules(&self) -> Result<Vec<CacheRule>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_no_rules() {
        let source = JsonFileRuleSource::new("/nonexistent/caching.config.json");
        assert!(source.rules().unwrap().is_empty());
    }

    #[test]
    fn parses_rules_in_file_order() {
        let path = std::env::temp_dir().join(format!("cache-rules-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                {"pathPattern": "/static/*", "cache": true},
                {"pathPattern": "/api/*", "cache": false}
            ]"#,
        )
        .unwrap();

        let rules = JsonFileRuleSource::new(&path).rules().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            rules,
            vec![
                CacheRule {
                    path_pattern: "/static/*".to_string(),
                    cache: true,
                },
                CacheRule {
                    path_pattern: "/api/*".to_string(),
                    cache: false,
                },
            ]
        );
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let path = std::env::temp_dir().join(format!("bad-rules-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileRuleSource::new(&path).rules().unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, AppError::Config(_)));
    }
}
