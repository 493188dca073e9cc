use serde::Serialize;

use crate::domain::types::{UserId, Username};

/// Registered account. The password is only ever held as a PHC hash string.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
}
