//! User and session types.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// A user record as served by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// The authenticated identity: the profile plus the bearer token replayed
/// on protected calls. This is exactly the login/register response payload
/// and the shape persisted to the `session` durable slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSession {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub token: String,
}
