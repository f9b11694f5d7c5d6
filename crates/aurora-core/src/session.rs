// ── Session context ──
//
// The signed-in user and their API token, passed explicitly to whatever
// needs them instead of living in ambient global state.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// The signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    token: Option<SecretString>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, token: SecretString) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    /// A session that carries a token but no user profile (e.g. a CLI token).
    pub fn with_token(token: SecretString) -> Self {
        Self {
            user: None,
            token: Some(token),
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
