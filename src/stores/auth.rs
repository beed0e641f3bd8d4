//! Auth store - demo login state.
//!
//! There is no credential check: any syntactically valid email logs in.

use crate::{
    errors::{Error, Result},
    models::{User, UserPatch, UserRole},
    storage::PersistedStore,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Session token handed out on every login.
pub const DEMO_TOKEN: &str = "demo-token";

/// Current session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStore {
    /// Logged-in user
    #[serde(default)]
    pub user: Option<User>,
    /// Set on login, cleared on logout
    #[serde(default)]
    pub is_authenticated: bool,
    /// Session token while logged in
    #[serde(default)]
    pub token: Option<String>,
}

impl PersistedStore for AuthStore {
    const STORAGE_KEY: &'static str = "auth-storage";
}

/// Checks the `local@domain` shape and returns the trimmed address.
///
/// # Errors
/// Returns `Error::InvalidEmail` when either side of the single `@` is empty.
pub fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(Error::InvalidEmail {
            email: email.to_string(),
        }),
    }
}

impl AuthStore {
    /// Logs in as `email`. The display name falls back to the local part of
    /// the address, and addresses containing "admin" get the admin role.
    ///
    /// # Errors
    /// Returns `Error::InvalidEmail` for a malformed address; the session is
    /// left untouched.
    pub fn login(&mut self, email: &str, name: Option<&str>) -> Result<&User> {
        let email = validate_email(email)?;
        let display_name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(
                || email.split('@').next().unwrap_or(email).to_string(),
                ToString::to_string,
            );
        let role = if email.contains("admin") {
            UserRole::Admin
        } else {
            UserRole::Sales
        };

        info!(%email, ?role, "User logged in");
        self.is_authenticated = true;
        self.token = Some(DEMO_TOKEN.to_string());
        Ok(self.user.insert(User {
            id: email.to_string(),
            email: email.to_string(),
            name: display_name,
            role,
        }))
    }

    /// Clears the session.
    pub fn logout(&mut self) {
        self.user = None;
        self.is_authenticated = false;
        self.token = None;
    }

    /// Merges a patch into the logged-in user; does nothing when logged out.
    pub fn update_user(&mut self, patch: UserPatch) -> Option<&User> {
        let user = self.user.as_mut()?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        Some(user)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_login_derives_name_from_email() {
        let mut store = AuthStore::default();
        let user = store.login("demo@segeltorp.se", None).unwrap();
        assert_eq!(user.name, "demo");
        assert_eq!(user.id, "demo@segeltorp.se");
        assert_eq!(user.role, UserRole::Sales);
        assert!(store.is_authenticated);
        assert_eq!(store.token.as_deref(), Some(DEMO_TOKEN));
    }

    #[test]
    fn test_admin_role_from_email() {
        let mut store = AuthStore::default();
        let user = store.login("admin@segeltorp.se", Some("Chefen")).unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.name, "Chefen");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut store = AuthStore::default();
        for email in ["", "no-at-sign", "@segeltorp.se", "anna@", "a@b@c"] {
            assert!(
                matches!(store.login(email, None), Err(Error::InvalidEmail { .. })),
                "{email} should be rejected"
            );
        }
        assert!(!store.is_authenticated);
    }

    #[test]
    fn test_logout_clears_state() {
        let mut store = AuthStore::default();
        store.login("anna@segeltorp.se", None).unwrap();
        store.logout();
        assert_eq!(store, AuthStore::default());
    }

    #[test]
    fn test_update_user() {
        let mut store = AuthStore::default();
        assert!(store.update_user(UserPatch::default()).is_none());

        store.login("anna@segeltorp.se", None).unwrap();
        let user = store
            .update_user(UserPatch {
                name: Some("Anna Svensson".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(user.name, "Anna Svensson");
        assert_eq!(user.email, "anna@segeltorp.se");
    }
}
