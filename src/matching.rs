/// Name and domain matching utilities
///
/// Managed policy names vary in separators and casing across the console and
/// the API ("Managed-CachingDisabled" vs "Managed Caching Disabled"), so
/// lookups compare normalized keys. Certificate domains are compared with a
/// wildcard rule that mirrors how the distribution is actually addressed.

/// Normalize a policy name for comparison: lowercase and keep only `[a-z0-9]`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Check whether `host` is covered by `pattern`, case-insensitively.
///
/// Exact equality matches. A pattern starting with `*.` matches the bare base
/// domain and any subdomain under it, including multi-level ones
/// (`*.example.com` covers `example.com`, `api.example.com` and
/// `a.b.example.com`). That is intentionally looser than certificate-authority
/// wildcard semantics and must stay that way: existing certificates were
/// selected under this rule.
pub fn domain_matches(host: &str, pattern: &str) -> bool {
    if host.is_empty() || pattern.is_empty() {
        return false;
    }

    let host = host.to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();

    if host == pattern {
        return true;
    }

    if let Some(base) = pattern.strip_prefix("*.") {
        return host == base || host.ends_with(&format!(".{}", base));
    }

    false
}
