//! OAuth scopes
//!
//! Scopes annotate requests only: a call needs the union of the scopes
//! required by the endpoints it touches. Scope sets are compared by content,
//! never by order, so every cache lookup goes through [`scope_key`].

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Permission granted to an access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scope {
    /// Read the end user's profile data, excluding products and services
    UserProfileRead,
    /// Read the end user's profile data, including products and services
    UserRead,
    /// Create, update and delete the end user's profile data
    UserWrite,
    /// Read the end user's viewable data (PNG, SVF, ...)
    ViewablesRead,
    /// Read all of the end user's data, viewable or not
    DataRead,
    /// Create, update and delete data on behalf of the end user
    DataWrite,
    /// Create data on behalf of the end user
    DataCreate,
    /// Search the end user's data
    DataSearch,
    /// Create an OSS bucket owned by the application
    BucketCreate,
    /// Read metadata and list contents of accessible OSS buckets
    BucketRead,
    /// Set permissions and entitlements on modifiable OSS buckets
    BucketUpdate,
    /// Delete buckets the application may delete
    BucketDelete,
    /// Author and execute code on behalf of the end user
    CodeAll,
    /// Read account data the end user is entitled to
    AccountRead,
    /// Update account data the end user is entitled to
    AccountWrite,
}

impl_wire_enum_conversions!(Scope {
    UserProfileRead => "user-profile:read",
    UserRead => "user:read",
    UserWrite => "user:write",
    ViewablesRead => "viewables:read",
    DataRead => "data:read",
    DataWrite => "data:write",
    DataCreate => "data:create",
    DataSearch => "data:search",
    BucketCreate => "bucket:create",
    BucketRead => "bucket:read",
    BucketUpdate => "bucket:update",
    BucketDelete => "bucket:delete",
    CodeAll => "code:all",
    AccountRead => "account:read",
    AccountWrite => "account:write",
});

impl TryFrom<String> for Scope {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.as_str().to_string()
    }
}

/// Canonical cache key for a scope set
///
/// Values are sorted lexicographically, de-duplicated and joined with `+`, so
/// `[A, B]`, `[B, A]` and `[A, B, A]` all produce the same key.
#[must_use]
pub fn scope_key(scopes: &[Scope]) -> String {
    let mut values: Vec<&str> = scopes.iter().map(Scope::as_str).collect();
    values.sort_unstable();
    values.dedup();
    values.join("+")
}

/// Space-separated scope list as sent in the `scope` form field
#[must_use]
pub fn scope_param(scopes: &[Scope]) -> String {
    scopes.iter().map(Scope::as_str).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_key_is_order_insensitive() {
        let forward = scope_key(&[Scope::DataRead, Scope::BucketRead]);
        let backward = scope_key(&[Scope::BucketRead, Scope::DataRead]);
        assert_eq!(forward, backward);
        assert_eq!(forward, "bucket:read+data:read");
    }

    #[test]
    fn test_scope_key_ignores_duplicates() {
        assert_eq!(
            scope_key(&[Scope::DataRead, Scope::DataRead, Scope::ViewablesRead]),
            scope_key(&[Scope::ViewablesRead, Scope::DataRead])
        );
    }

    #[test]
    fn test_scope_key_of_empty_set() {
        assert_eq!(scope_key(&[]), "");
    }

    #[test]
    fn test_scope_param_keeps_caller_order() {
        let param = scope_param(&[Scope::ViewablesRead, Scope::DataRead]);
        assert_eq!(param, "viewables:read data:read");
    }

    #[test]
    fn test_serde_uses_wire_string() {
        let json = serde_json::to_string(&Scope::UserProfileRead).unwrap();
        assert_eq!(json, "\"user-profile:read\"");

        let parsed: Scope = serde_json::from_str("\"code:all\"").unwrap();
        assert_eq!(parsed, Scope::CodeAll);

        assert!(serde_json::from_str::<Scope>("\"data:destroy\"").is_err());
    }

    #[test]
    fn test_every_scope_round_trips_through_fromstr() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>().unwrap(), *scope);
        }
    }
}
