//! Account service.
//!
//! Registration, login, and password changes. Passwords are stored and
//! compared verbatim; the login response carries the stored record as-is.
//! This mirrors the upstream service's observable behavior and is recorded
//! as a hardening point in DESIGN.md.

mod error;

pub use error::AccountError;

use sqlx::PgPool;

use kumquat_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Compare a candidate password against the stored value.
///
/// Exact string equality; nothing is hashed.
#[must_use]
pub fn verify_password(candidate: &str, stored: &str) -> bool {
    candidate == stored
}

/// Account service.
///
/// Handles user registration, login, and password changes.
pub struct AccountService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the email format is invalid.
    /// Returns `AccountError::EmptyPassword` if the password is empty.
    /// Returns `AccountError::AlreadyRegistered` if the email is taken.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let email = Email::parse(email)?;

        if password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let user = self
            .users
            .create(&email, password)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AccountError::AlreadyRegistered,
                other => AccountError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// On success returns the full user record, stored password included.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` if the email is unknown or
    /// the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        // Treat an unparseable email as unknown rather than malformed, so
        // login failures are indistinguishable to the caller.
        let Ok(email) = Email::parse(email) else {
            return Err(AccountError::InvalidCredentials);
        };

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, &user.password) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Change a user's password after checking the old one.
    ///
    /// The new password overwrites the stored value verbatim.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UserNotFound` if the email is unknown.
    /// Returns `AccountError::WrongOldPassword` if the old password does not match.
    /// Returns `AccountError::EmptyPassword` if the new password is empty.
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AccountError::UserNotFound);
        };

        if new_password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if !verify_password(old_password, &user.password) {
            return Err(AccountError::WrongOldPassword);
        }

        self.users.update_password(user.id, new_password).await?;

        Ok(())
    }
}
