//! Scan targets: loading the target list and resolving hosts.
//!
//! A target is whatever the user put on one line of the target file, a
//! hostname or a literal IP. Each target is resolved exactly once, before
//! any of its ports are probed.

use crate::error::{TargetError, TargetResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::net::IpAddr;
use std::path::Path;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A host identifier as read from the target file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Create a target from a host string.
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }

    /// The host string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a newline-delimited target list.
///
/// Lines are trimmed and blank lines dropped. There is no comment syntax.
pub fn parse_targets(content: &str) -> Vec<Target> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Target::new)
        .collect()
}

/// Read and parse a target file.
pub fn load_targets(path: &Path) -> TargetResult<Vec<Target>> {
    let content = fs::read_to_string(path).map_err(|e| TargetError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(parse_targets(&content))
}

/// Maps a target to the address its ports are probed on.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve a target to a single IP address.
    async fn resolve(&self, target: &Target) -> TargetResult<IpAddr>;
}

/// DNS-backed resolver.
///
/// IP literals short-circuit. Hostnames are looked up with the system
/// resolver configuration (hosts file included) and IPv4 answers win.
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    /// Build a resolver from the system configuration, or the default
    /// upstream configuration when none is available.
    pub fn new() -> Self {
        let inner = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => resolver,
            Err(e) => {
                tracing::debug!("system resolver config unavailable ({}), using defaults", e);
                TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
            }
        };
        Self { inner }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolver for DnsResolver {
    async fn resolve(&self, target: &Target) -> TargetResult<IpAddr> {
        let host = target.as_str();

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        if !is_valid_hostname(host) {
            return Err(TargetError::InvalidFormat(host.to_string()));
        }

        let response = self
            .inner
            .lookup_ip(host)
            .await
            .map_err(|e| TargetError::DnsResolutionFailed(host.to_string(), e.to_string()))?;

        let ips: Vec<IpAddr> = response.iter().collect();
        ips.iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| ips.first())
            .copied()
            .ok_or_else(|| TargetError::NoAddressesFound(host.to_string()))
    }
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.trim_end_matches('.').split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        // Underscores anywhere; hyphens not at either edge.
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        if !label
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_targets_skips_blank_lines() {
        let targets = parse_targets("127.0.0.1\n\n  example.com  \n\t\nscanme.local\n");
        assert_eq!(
            targets,
            vec![
                Target::new("127.0.0.1"),
                Target::new("example.com"),
                Target::new("scanme.local"),
            ]
        );
    }

    #[test]
    fn test_parse_targets_empty() {
        assert!(parse_targets("").is_empty());
        assert!(parse_targets("\n   \n\n").is_empty());
    }

    #[test]
    fn test_load_targets_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10.0.0.1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "10.0.0.2").unwrap();

        let targets = load_targets(file.path()).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].as_str(), "10.0.0.2");
    }

    #[test]
    fn test_load_targets_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_targets(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(TargetError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let resolver = DnsResolver::new();
        let ip = resolver.resolve(&Target::new("127.0.0.1")).await.unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_rejects_malformed_name() {
        let resolver = DnsResolver::new();
        let result = resolver.resolve(&Target::new("not a host!")).await;
        assert!(matches!(result, Err(TargetError::InvalidFormat(_))));
    }

    #[test]
    fn test_valid_hostname() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.com."));
        assert!(is_valid_hostname("my-server"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-invalid.com"));
        assert!(!is_valid_hostname("invalid-.com"));
        assert!(!is_valid_hostname("two words"));
    }

    #[test]
    fn test_underscore_names_reach_the_resolver() {
        assert!(is_valid_hostname("build_box"));
        assert!(is_valid_hostname("db_01.internal.example"));
        assert!(is_valid_hostname("_sip._tcp.example.com"));
    }

    #[tokio::test]
    async fn test_underscore_name_is_looked_up() {
        let resolver = DnsResolver::new();
        let result = resolver
            .resolve(&Target::new("no_such_host.invalid"))
            .await;
        // Rejected by the lookup, not by the name check.
        assert!(!matches!(result, Err(TargetError::InvalidFormat(_))));
    }
}
