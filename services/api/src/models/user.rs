//! User model and related payloads

use serde::{Deserialize, Serialize};

use common::messages;

use crate::models::ObjectId;
use crate::validation::{NAME_MAX, NAME_MIN, PASSWORD_MIN, is_valid_email, is_valid_url};

/// User entity as stored. The password hash never leaves the store layer;
/// responses go through [`UserResponse`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
}

/// Validated signup payload. The password is still plaintext here; the
/// repository hashes it before anything is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
}

impl NewUser {
    /// Schema-level constraint check, mirroring what the document store
    /// enforces independently of request validation.
    pub fn constraint_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        check_name(&self.name, &mut violations);
        if !is_valid_email(&self.email) {
            violations.push(messages::INVALID_EMAIL.to_string());
        }
        if self.password.len() < PASSWORD_MIN {
            violations.push(messages::PASSWORD_TOO_SHORT.to_string());
        }
        if !is_valid_url(&self.avatar) {
            violations.push(messages::INVALID_URL.to_string());
        }
        violations
    }
}

/// Validated profile-update payload (name and avatar only; email and
/// password are immutable through this path).
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub avatar: String,
}

impl ProfileUpdate {
    pub fn constraint_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        check_name(&self.name, &mut violations);
        if !is_valid_url(&self.avatar) {
            violations.push(messages::INVALID_URL.to_string());
        }
        violations
    }
}

fn check_name(name: &str, violations: &mut Vec<String>) {
    let len = name.chars().count();
    if len < NAME_MIN {
        violations.push(messages::NAME_TOO_SHORT.to_string());
    } else if len > NAME_MAX {
        violations.push(messages::NAME_TOO_LONG.to_string());
    }
}

/// Signin payload after validation.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// User as rendered in responses. There is deliberately no password field.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
        }
    }
}
