use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role assigned by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
    Doctor,
    Delivery,
    Manufacturer,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Customer
    }
}

/// Contact and address details attached to a customer account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check whether the user holds any of the given roles
    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}

/// Face shape vocabulary returned by the detection endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Round,
    Oval,
    Square,
    Heart,
    Diamond,
    Oblong,
    Triangle,
    #[serde(other)]
    Unknown,
}

impl Default for FaceShape {
    fn default() -> Self {
        Self::Unknown
    }
}

/// In-memory authentication state for the current user.
///
/// Authentication is derived, not stored: a session is authenticated exactly
/// when a user is present and both tokens are non-empty, so the state can
/// never claim to be signed in while missing a credential.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }

    /// Role check; always false while anonymous.
    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        self.is_authenticated()
            && self
                .user
                .as_ref()
                .is_some_and(|user| user.has_role(roles))
    }

    /// Reset to the anonymous state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
