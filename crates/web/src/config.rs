//! Application configuration.
//!
//! An explicit structure with an enumerated, typed field set. Loading from
//! the environment or from files belongs to a collaborator; this layer only
//! defines the fields, their defaults and the merge operation.

use serde::Deserialize;

/// Framework configuration consumed by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When set, 500 responses carry the underlying error text instead of
    /// the generic body. Never enable in production.
    pub debug: bool,
    /// Hosts the dispatcher accepts. Empty means unrestricted. Entries may
    /// be exact hosts, `"*"`, or `.suffix` domain patterns.
    pub allowed_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self { debug: false, allowed_hosts: Vec::new() }
    }
}

/// Partial configuration for explicit overriding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub debug: Option<bool>,
    pub allowed_hosts: Option<Vec<String>>,
}

impl Config {
    /// Applies the overrides, replacing exactly the fields they carry.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(debug) = overrides.debug {
            self.debug = debug;
        }
        if let Some(allowed_hosts) = overrides.allowed_hosts {
            self.allowed_hosts = allowed_hosts;
        }
        self
    }

    /// Whether a request carrying `host` may be served.
    ///
    /// With no configured hosts every request passes. Otherwise the host
    /// (port stripped) must match an entry exactly, by `.suffix` pattern,
    /// or the wildcard `"*"`; a missing host is rejected.
    pub fn host_allowed(&self, host: Option<&str>) -> bool {
        if self.allowed_hosts.is_empty() {
            return true;
        }
        let Some(host) = host else {
            return false;
        };
        let bare = host.split(':').next().unwrap_or(host);

        self.allowed_hosts
            .iter()
            .any(|allowed| allowed == "*" || allowed == bare || (allowed.starts_with('.') && bare.ends_with(allowed.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_only_given_fields() {
        let config = Config::default().merge(ConfigOverrides { debug: Some(true), ..Default::default() });

        assert!(config.debug);
        assert!(config.allowed_hosts.is_empty());
    }

    #[test]
    fn empty_allowed_hosts_admits_anything() {
        let config = Config::default();

        assert!(config.host_allowed(Some("example.com")));
        assert!(config.host_allowed(None));
    }

    #[test]
    fn exact_host_matches_with_or_without_port() {
        let config = Config::default()
            .merge(ConfigOverrides { allowed_hosts: Some(vec!["example.com".into()]), ..Default::default() });

        assert!(config.host_allowed(Some("example.com")));
        assert!(config.host_allowed(Some("example.com:8080")));
        assert!(!config.host_allowed(Some("example.org")));
        assert!(!config.host_allowed(None));
    }

    #[test]
    fn dot_prefix_matches_subdomains() {
        let config = Config::default()
            .merge(ConfigOverrides { allowed_hosts: Some(vec![".example.com".into()]), ..Default::default() });

        assert!(config.host_allowed(Some("api.example.com")));
        assert!(!config.host_allowed(Some("example.org")));
    }

    #[test]
    fn wildcard_matches_everything() {
        let config =
            Config::default().merge(ConfigOverrides { allowed_hosts: Some(vec!["*".into()]), ..Default::default() });

        assert!(config.host_allowed(Some("anything.example")));
    }
}
