//! Identity context of the current session.
//!
//! The signed-in user is held in an explicit value owned by the dashboard
//! rather than in global state. Signing in through the identity provider is
//! outside this application: a profile and token obtained elsewhere are
//! handed to [`AuthContext::sign_in`].

use tracing::{debug, info};

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub display_name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    current_user: Option<UserProfile>,
    id_token: Option<String>,
}

impl AuthContext {
    /// Context with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, profile: UserProfile, id_token: Option<String>) {
        info!(email = %profile.email, "User signed in");
        self.current_user = Some(profile);
        self.id_token = id_token;
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(email = %user.email, "User signed out");
        }
        self.id_token = None;
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Bearer token of the signed-in user; `None` when signed out.
    pub fn id_token(&self) -> Option<&str> {
        if self.current_user.is_none() {
            debug!("Token requested without a signed-in user");
            return None;
        }
        self.id_token.as_deref()
    }
}
