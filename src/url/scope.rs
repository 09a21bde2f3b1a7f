//! Domain scope filtering for discovered links

/// Scope policy applied to links that carry an explicit host.
///
/// Links that inherit the base URL's host are always in scope; the policy
/// only decides whether to follow links that name their own host.
#[derive(Debug, Clone)]
pub struct ScopePolicy {
    seed_host: String,
    same_domain_only: bool,
    include_subdomains: bool,
}

impl ScopePolicy {
    /// Creates a scope policy anchored at the starting host.
    pub fn new(
        seed_host: impl Into<String>,
        same_domain_only: bool,
        include_subdomains: bool,
    ) -> Self {
        Self {
            seed_host: seed_host.into(),
            same_domain_only,
            include_subdomains,
        }
    }

    /// Returns whether a discovered link is in scope.
    ///
    /// With subdomains included, the starting host must appear as a substring
    /// of the link's host; otherwise the hosts must match exactly.
    pub fn allows(&self, link_host: &str, explicit_host: bool) -> bool {
        if !self.same_domain_only || !explicit_host {
            return true;
        }

        if self.include_subdomains {
            link_host.contains(&self.seed_host)
        } else {
            link_host == self.seed_host
        }
    }
}
