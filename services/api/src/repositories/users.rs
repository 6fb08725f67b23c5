//! User repository

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use tokio::sync::RwLock;
use tracing::info;

use common::fault::StorageFault;

use crate::models::{NewUser, ObjectId, ProfileUpdate, User};

/// User repository
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user. The plaintext password is hashed here and
    /// discarded; only the hash is stored. Emails are unique.
    pub async fn create(&self, new_user: NewUser) -> Result<User, StorageFault> {
        let violations = new_user.constraint_violations();
        if !violations.is_empty() {
            return Err(StorageFault::Constraint { violations });
        }

        let salt = SaltString::generate(&mut rand::thread_rng());
        let password_hash = Argon2::default()
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| StorageFault::Unknown(format!("failed to hash password: {e}")))?
            .to_string();

        // Uniqueness check and insert under one write lock.
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == new_user.email) {
            return Err(StorageFault::UniqueViolation);
        }

        let user = User {
            id: ObjectId::new(),
            name: new_user.name,
            email: new_user.email,
            password_hash,
            avatar: new_user.avatar,
        };
        users.insert(user.id, user.clone());
        info!("Created user {}", user.id);
        Ok(user)
    }

    /// Find a user by id; a missing document is a `NotFound` fault.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<User, StorageFault> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StorageFault::NotFound)
    }

    /// Look up a user by email and check the password against the stored
    /// hash. Returns `None` for an unknown email or a wrong password; the
    /// caller cannot tell which.
    pub async fn find_by_credentials(&self, email: &str, password: &str) -> Option<User> {
        let user = {
            let users = self.users.read().await;
            users.values().find(|user| user.email == email)?.clone()
        };

        let parsed_hash = PasswordHash::new(&user.password_hash).ok()?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .ok()?;
        Some(user)
    }

    /// Update a user's name and avatar. Email and password are untouched.
    pub async fn update_profile(
        &self,
        id: ObjectId,
        update: ProfileUpdate,
    ) -> Result<User, StorageFault> {
        let violations = update.constraint_violations();
        if !violations.is_empty() {
            return Err(StorageFault::Constraint { violations });
        }

        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(StorageFault::NotFound)?;
        user.name = update.name;
        user.avatar = update.avatar;
        Ok(user.clone())
    }
}
