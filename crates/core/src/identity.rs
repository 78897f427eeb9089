//! Identity provider boundary.
//!
//! Sign-in happens at a hosted identity provider. The storefront only
//! receives the resulting profile and never sees or checks credentials.

use serde::{Deserialize, Serialize};

/// Profile of a signed-in user, as handed over by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-assigned user id.
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub primary_email: Option<String>,
}

impl UserProfile {
    /// "First Last", skipping whichever part is blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => self.id.clone(),
        }
    }
}

/// Whether someone is signed in, and as whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "profile", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(UserProfile),
}

impl AuthState {
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::SignedIn(profile) => Some(profile),
            Self::SignedOut => None,
        }
    }
}

impl From<Option<UserProfile>> for AuthState {
    fn from(profile: Option<UserProfile>) -> Self {
        profile.map_or(Self::SignedOut, Self::SignedIn)
    }
}
