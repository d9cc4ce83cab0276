//! Platform users (therapists and patients) and the row shape the user
//! table renders.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_opt_string, lenient_string};
use crate::impl_domain_status_conversions;

/// User record as the backend returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// `"true"` when the account is unrestricted. Some deployments send a
    /// JSON boolean, which is read as its string form.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.active.as_deref() == Some("true")
    }

    /// Role the backend reported, if it is one we recognise.
    pub fn parsed_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }

    /// Copy of this record with `role` forced.
    pub fn with_role(mut self, role: UserType) -> Self {
        self.role = Some(role.to_string());
        self
    }
}

/// Role shown in the user table and used by the role filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Therapist,
    Patient,
    Admin,
}

impl_domain_status_conversions!(UserRole {
    Therapist => "Therapist",
    Patient => "Patient",
    Admin => "Admin",
});

impl UserRole {
    /// Account type for user actions; admins have none.
    pub fn user_type(self) -> Option<UserType> {
        match self {
            Self::Therapist => Some(UserType::Therapist),
            Self::Patient => Some(UserType::Patient),
            Self::Admin => None,
        }
    }
}

/// Account type the user-action endpoints expect (`"therapist"`/`"patient"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Therapist,
    Patient,
}

impl_domain_status_conversions!(UserType {
    Therapist => "therapist",
    Patient => "patient",
});

impl From<UserType> for UserRole {
    fn from(value: UserType) -> Self {
        match value {
            UserType::Therapist => Self::Therapist,
            UserType::Patient => Self::Patient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Restricted,
    #[serde(rename = "Pending Verification")]
    PendingVerification,
}

impl_domain_status_conversions!(UserStatus {
    Active => "Active",
    Restricted => "Restricted",
    PendingVerification => "Pending Verification",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Pending,
}

impl_domain_status_conversions!(VerificationStatus {
    Verified => "Verified",
    Pending => "Pending",
});

/// One row of the user-management table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub last_login: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub location: String,
    pub phone: Option<String>,
    /// Therapists only.
    pub verification_status: Option<VerificationStatus>,
    pub rating: Option<f64>,
    pub reviews_count: Option<u32>,
}

impl UserRow {
    /// Project a server record into a table row for the given role.
    pub fn from_user(user: &User, role: UserRole) -> Self {
        let status = if user.is_active() { UserStatus::Active } else { UserStatus::Restricted };
        let is_therapist = role == UserRole::Therapist;
        let verification_status = is_therapist.then(|| {
            if user.verification_status.as_deref() == Some("verified") {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Pending
            }
        });

        Self {
            id: user.id.clone(),
            name: user.full_name.clone(),
            email: user.email.clone(),
            last_login: user.last_login.clone().unwrap_or_else(|| "Never".to_string()),
            status,
            role,
            location: user
                .city
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            phone: user.phone.clone(),
            verification_status,
            rating: if is_therapist { user.rating } else { None },
            reviews_count: if is_therapist { user.reviews_count } else { None },
        }
    }
}
