use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

use crate::auth::errors::JabberIdError;

/// Unordered set of role names, unique by name.
pub type RoleSet = BTreeSet<String>;

/// Structured user identifier of the form `local@domain/resource`.
///
/// Local and domain parts are mandatory and lowercased on construction;
/// the resource part is optional and case-preserved. Immutable once built.
#[derive(Debug, Clone)]
pub struct JabberId {
    local: String,
    domain: String,
    resource: Option<String>,
}

impl JabberId {
    /// Create an identifier from its parts.
    ///
    /// # Arguments
    /// * `local` - Local part (the username), case-normalized
    /// * `domain` - Domain part (the realm), case-normalized
    /// * `resource` - Optional resource part, kept verbatim
    ///
    /// # Errors
    /// * `EmptyLocalPart` - Local part is empty
    /// * `EmptyDomain` - Domain part is empty
    pub fn new(
        local: &str,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Self, JabberIdError> {
        if local.is_empty() {
            return Err(JabberIdError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(JabberIdError::EmptyDomain);
        }
        Ok(Self {
            local: local.to_lowercase(),
            domain: domain.to_lowercase(),
            resource: resource.filter(|r| !r.is_empty()).map(str::to_string),
        })
    }

    /// Create a bare identifier (no resource part).
    pub fn bare(local: &str, domain: &str) -> Result<Self, JabberIdError> {
        Self::new(local, domain, None)
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

// Authentication identity is the normalized bare pair; two sessions of the
// same account with different resources are the same principal identity.
impl PartialEq for JabberId {
    fn eq(&self, other: &Self) -> bool {
        self.local == other.local && self.domain == other.domain
    }
}

impl Eq for JabberId {}

impl Hash for JabberId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local.hash(state);
        self.domain.hash(state);
    }
}

impl FromStr for JabberId {
    type Err = JabberIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (local, rest) = s.split_once('@').ok_or(JabberIdError::MissingSeparator)?;
        match rest.split_once('/') {
            Some((domain, resource)) => Self::new(local, domain, Some(resource)),
            None => Self::new(local, rest, None),
        }
    }
}

impl fmt::Display for JabberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{}", resource)?;
        }
        Ok(())
    }
}

/// Resolved identity plus authentication outcome plus role memberships,
/// produced once per authentication attempt and owned by the host for the
/// session's lifetime.
///
/// Invariant: an unauthenticated principal never carries roles. `with_roles`
/// attaches roles to an authenticated principal only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    identifier: JabberId,
    authenticated: bool,
    roles: RoleSet,
}

impl Principal {
    /// Create an unauthenticated principal with no roles.
    pub fn new(identifier: JabberId) -> Self {
        Self {
            identifier,
            authenticated: false,
            roles: RoleSet::new(),
        }
    }

    /// Return a copy of this principal with the authenticated flag set.
    pub fn mark_authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    /// Return a copy of this principal carrying the given roles.
    ///
    /// Roles only attach to an authenticated principal; on an
    /// unauthenticated one this is a no-op.
    pub fn with_roles<I>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if self.authenticated {
            self.roles = roles.into_iter().collect();
        }
        self
    }

    pub fn identifier(&self) -> &JabberId {
        &self.identifier
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Role membership query.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
