//! Authentication service.
//!
//! Registration, login, and password changes. Passwords are hashed with
//! argon2 before they ever leave this process; the store only sees hashes
//! and never returns them.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::Utc;
use serde_json::json;

use voltbay_core::{Email, RecordId, Resource, User};

use crate::api::{Query, StoreClient};
use crate::error::ClientError;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    client: StoreClient,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Register a new user.
    ///
    /// Email uniqueness is checked with a pre-query; the check and the
    /// create are not atomic, so two concurrent registrations can still
    /// both succeed.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a malformed email or short
    /// password, and `ClientError::Conflict` if the email is taken.
    pub async fn register(&self, new_user: NewUser) -> Result<User, ClientError> {
        let email = Email::parse(&new_user.email)
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        validate_password(&new_user.password)?;

        if self.email_exists(email.as_str()).await? {
            return Err(ClientError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let user = User {
            id: RecordId::generate(),
            email,
            password: Some(hash_password(&new_user.password)?),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone: String::new(),
            avatar: String::new(),
            is_verified: false,
            created_at: Utc::now(),
        };

        // The store strips the hash from the response.
        self.client.create(Resource::Users, &user).await
    }

    /// Login with email and password via the bespoke `/login` endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` if the credentials are wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        self.client.login(email, password).await
    }

    /// Is any user registered under this email?
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn email_exists(&self, email: &str) -> Result<bool, ClientError> {
        let matches: Vec<User> = self
            .client
            .fetch_collection(Resource::Users, &Query::new().filter("email", email))
            .await?;
        Ok(!matches.is_empty())
    }

    /// Change a user's password, verifying the current one first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` if the current password is
    /// wrong, `ClientError::Validation` if the new one is too short.
    pub async fn change_password(
        &self,
        user: &User,
        current: &str,
        new: &str,
    ) -> Result<(), ClientError> {
        validate_password(new)?;
        self.client.login(user.email.as_str(), current).await?;

        let hash = hash_password(new)?;
        let _: User = self
            .client
            .update(Resource::Users, user.id.as_str(), &json!({ "password": hash }))
            .await?;
        Ok(())
    }
}

/// Hash a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, ClientError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ClientError::PasswordHash)
}

fn validate_password(password: &str) -> Result<(), ClientError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ClientError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
