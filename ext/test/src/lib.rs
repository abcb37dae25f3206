//! credql-test: test credential domain for conformance testing
//!
//! Provides credential implementations with predictable, controllable
//! shapes for exercising the matcher engine. This is also the reference
//! extension showing how a domain plugs its types into the capability
//! contract.
//!
//! Two styles of credential live here:
//!
//! - [`UsernamePassword`] and [`ApiToken`]: fixed-shape domain types whose
//!   properties are registered in static [`PropertyTable`]s.
//! - [`TestCredential`]: a map-backed credential whose shape is assembled
//!   per test, including deliberately broken properties (write-only
//!   entries and failing accessors).
//!
//! # Example
//!
//! ```
//! use credql::prelude::*;
//! use credql_test::TestCredential;
//!
//! let credential = TestCredential::new()
//!     .with_username("alice")
//!     .with("active", true);
//!
//! assert!(with_username("alice").matches(&credential));
//! assert!(with_property("active", true).matches(&credential));
//! ```

use credql::prelude::*;
use std::collections::HashMap;


// ═══════════════════════════════════════════════════════════════════════════════
// Map-backed test credential
// ═══════════════════════════════════════════════════════════════════════════════

/// A credential whose shape is assembled at runtime.
///
/// Every part is optional: a bare `TestCredential` has no username
/// capability and no properties at all. Builder methods add properties one
/// at a time, including broken ones for exercising the failure arms of
/// [`PropertyRead`].
#[derive(Debug, Clone, Default)]
pub struct TestCredential {
    username: Option<String>,
    properties: HashMap<String, StoredProperty>,
}

#[derive(Debug, Clone)]
enum StoredProperty {
    Value(PropertyValue),
    WriteOnly,
    Failing(String),
}

impl TestCredential {
    /// Create a credential with no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the username capability with the given username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Add a readable property.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties
            .insert(name.into(), StoredProperty::Value(value.into()));
        self
    }

    /// Add a property that exists but cannot be read.
    #[must_use]
    pub fn with_write_only(mut self, name: impl Into<String>) -> Self {
        self.properties
            .insert(name.into(), StoredProperty::WriteOnly);
        self
    }

    /// Add a property whose read always fails with the given message.
    #[must_use]
    pub fn with_failing(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.properties
            .insert(name.into(), StoredProperty::Failing(message.into()));
        self
    }
}

impl Credential for TestCredential {
    fn read_property(&self, name: &str) -> PropertyRead {
        match self.properties.get(name) {
            Some(StoredProperty::Value(value)) => PropertyRead::Value(value.clone()),
            Some(StoredProperty::WriteOnly) => PropertyRead::Unreadable,
            Some(StoredProperty::Failing(message)) => {
                PropertyRead::Failed(ReadError::new(message.clone()))
            }
            None => PropertyRead::Missing,
        }
    }

    fn as_username_bearing(&self) -> Option<&dyn UsernameBearing> {
        self.username.as_ref().map(|_| self as &dyn UsernameBearing)
    }
}

impl UsernameBearing for TestCredential {
    fn username(&self) -> &str {
        // Only reachable through as_username_bearing, which checks presence.
        self.username.as_deref().unwrap_or_default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Fixed-shape domain types
// ═══════════════════════════════════════════════════════════════════════════════

/// A username/password credential.
///
/// Carries the username capability. The password is registered as a
/// write-only property: it exists, but no criterion can ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernamePassword {
    username: String,
    password: String,
}

static USERNAME_PASSWORD_PROPERTIES: PropertyTable<UsernamePassword> = PropertyTable::new(&[
    (
        "username",
        Accessor::Read(|c: &UsernamePassword| Ok(PropertyValue::from(c.username.as_str()))),
    ),
    ("password", Accessor::WriteOnly),
]);

impl UsernamePassword {
    /// Create a new username/password credential.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The secret itself. Owners can read it; criteria cannot.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Credential for UsernamePassword {
    fn read_property(&self, name: &str) -> PropertyRead {
        USERNAME_PASSWORD_PROPERTIES.read(self, name)
    }

    fn as_username_bearing(&self) -> Option<&dyn UsernameBearing> {
        Some(self)
    }
}

impl UsernameBearing for UsernamePassword {
    fn username(&self) -> &str {
        &self.username
    }
}

/// The scope an [`ApiToken`] is valid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Valid everywhere.
    Global,
    /// Valid only for system-level access.
    System,
}

impl Scope {
    /// The property-value rendering of this scope.
    #[must_use]
    pub fn to_value(self) -> PropertyValue {
        let label = match self {
            Self::Global => "Global",
            Self::System => "System",
        };
        PropertyValue::enumeration("credql_test::Scope", label)
    }
}

/// An API token credential.
///
/// Has no username capability; exposes `id`, `active` and `scope` as
/// readable properties and `secret` as a write-only one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken {
    id: String,
    active: bool,
    scope: Scope,
}

static API_TOKEN_PROPERTIES: PropertyTable<ApiToken> = PropertyTable::new(&[
    (
        "id",
        Accessor::Read(|c: &ApiToken| Ok(PropertyValue::from(c.id.as_str()))),
    ),
    (
        "active",
        Accessor::Read(|c: &ApiToken| Ok(PropertyValue::Bool(c.active))),
    ),
    (
        "scope",
        Accessor::Read(|c: &ApiToken| Ok(c.scope.to_value())),
    ),
    ("secret", Accessor::WriteOnly),
]);

impl ApiToken {
    /// Create a new API token credential.
    pub fn new(id: impl Into<String>, active: bool, scope: Scope) -> Self {
        Self {
            id: id.into(),
            active,
            scope,
        }
    }

    /// The token id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the token is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The scope the token is valid in.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

impl Credential for ApiToken {
    fn read_property(&self, name: &str) -> PropertyRead {
        API_TOKEN_PROPERTIES.read(self, name)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{ApiToken, Scope, TestCredential, UsernamePassword};
    pub use credql::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_builder() {
        let credential = TestCredential::new()
            .with_username("alice")
            .with("active", true)
            .with("nickname", PropertyValue::Null);

        assert!(with_username("alice").matches(&credential));
        assert!(with_property("active", true).matches(&credential));
        assert!(with_property("nickname", PropertyValue::Null).matches(&credential));
    }

    #[test]
    fn bare_test_credential_has_no_capabilities() {
        let credential = TestCredential::new();
        assert!(credential.as_username_bearing().is_none());
        assert_eq!(credential.read_property("anything"), PropertyRead::Missing);
    }

    #[test]
    fn broken_properties_read_as_their_arm() {
        let credential = TestCredential::new()
            .with_write_only("secret")
            .with_failing("remote", "backing store offline");

        assert_eq!(credential.read_property("secret"), PropertyRead::Unreadable);
        assert_eq!(
            credential.read_property("remote"),
            PropertyRead::Failed(ReadError::new("backing store offline"))
        );
    }

    #[test]
    fn username_password_exposes_username_both_ways() {
        let credential = UsernamePassword::new("alice", "hunter2");

        assert!(with_username("alice").matches(&credential));
        assert!(with_property("username", "alice").matches(&credential));
    }

    #[test]
    fn password_is_never_readable() {
        let credential = UsernamePassword::new("alice", "hunter2");

        assert_eq!(credential.read_property("password"), PropertyRead::Unreadable);
        // Even the correct password does not match: unreadable is not a match.
        assert!(!with_property("password", "hunter2").matches(&credential));
    }

    #[test]
    fn api_token_properties() {
        let token = ApiToken::new("token-1", true, Scope::Global);

        assert!(with_property("id", "token-1").matches(&token));
        assert!(with_property("active", true).matches(&token));
        assert!(with_property("scope", Scope::Global.to_value()).matches(&token));
        assert!(!with_property("scope", Scope::System.to_value()).matches(&token));
    }

    #[test]
    fn api_token_has_no_username_capability() {
        let token = ApiToken::new("token-1", true, Scope::Global);
        assert!(!with_username("token-1").matches(&token));
    }
}
