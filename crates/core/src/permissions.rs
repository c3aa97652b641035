//! Permission strings carried in the `permissions` claim of access tokens.
//!
//! Every permission has the form `<verb>:<resource>`, one per
//! (HTTP method, resource) pair. These must match the permissions configured
//! on the API in the identity provider.

use std::fmt;
use std::str::FromStr;

/// The action half of a permission, one per HTTP method the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
        }
    }
}

/// The resource half of a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Movies,
    Actors,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Movies => "movies",
            Resource::Actors => "actors",
        }
    }
}

/// A single `<verb>:<resource>` permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub verb: Verb,
    pub resource: Resource,
}

impl Permission {
    pub const fn new(verb: Verb, resource: Resource) -> Self {
        Self { verb, resource }
    }

    /// Whether `claims` (the raw `permissions` array of a token) grants this permission.
    pub fn is_granted_by<S: AsRef<str>>(&self, claims: &[S]) -> bool {
        claims
            .iter()
            .any(|claim| claim.as_ref().parse::<Permission>().ok() == Some(*self))
    }
}

pub const GET_MOVIES: Permission = Permission::new(Verb::Get, Resource::Movies);
pub const POST_MOVIES: Permission = Permission::new(Verb::Post, Resource::Movies);
pub const PATCH_MOVIES: Permission = Permission::new(Verb::Patch, Resource::Movies);
pub const DELETE_MOVIES: Permission = Permission::new(Verb::Delete, Resource::Movies);
pub const GET_ACTORS: Permission = Permission::new(Verb::Get, Resource::Actors);
pub const POST_ACTORS: Permission = Permission::new(Verb::Post, Resource::Actors);
pub const PATCH_ACTORS: Permission = Permission::new(Verb::Patch, Resource::Actors);
pub const DELETE_ACTORS: Permission = Permission::new(Verb::Delete, Resource::Actors);

/// Every permission the API checks.
pub const ALL_PERMISSIONS: &[Permission] = &[
    GET_MOVIES,
    POST_MOVIES,
    PATCH_MOVIES,
    DELETE_MOVIES,
    GET_ACTORS,
    POST_ACTORS,
    PATCH_ACTORS,
    DELETE_ACTORS,
];

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.verb.as_str(), self.resource.as_str())
    }
}

/// Returned when a string is not one of the known permissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PERMISSIONS
            .iter()
            .find(|p| {
                s.split_once(':') == Some((p.verb.as_str(), p.resource.as_str()))
            })
            .copied()
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
