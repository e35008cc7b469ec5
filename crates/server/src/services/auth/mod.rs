//! Account and credential operations.
//!
//! All password handling lives here: hashes are produced and checked in this
//! module only, and never leave it. Credential failures collapse to a single
//! [`AuthError::InvalidCredentials`] regardless of whether the email or the
//! password was wrong.

mod error;

pub use error::AuthError;

use sqlx::SqlitePool;

use ratestore_core::{Email, Role, UserId};

use crate::db::{RepositoryError, users::UserRepository};
use crate::models::user::{NewUser, User};

/// bcrypt work factor. Fixed rather than configurable; changing it only
/// affects newly stored hashes.
const BCRYPT_COST: u32 = 10;

/// Self-registered accounts must use a full name.
const SIGNUP_NAME_MIN: usize = 20;
/// Admin-created accounts and profile updates allow short names.
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 60;
const ADDRESS_MAX: usize = 400;

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 16;
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Account creation, credential verification, and profile changes.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create an auth service over the given pool.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Self-registration. The role is always `NORMAL_USER`; callers cannot
    /// choose it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for rule violations,
    /// `AuthError::EmailTaken` for a duplicate email, and
    /// `AuthError::Repository` for database failures.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
    ) -> Result<User, AuthError> {
        validate_name(name, SIGNUP_NAME_MIN)?;
        validate_address(address)?;
        validate_password(password)?;
        let email = parse_email(email)?;

        let new = NewUser {
            name: name.to_string(),
            email,
            password_hash: hash_password(password)?,
            address: address.to_string(),
            role: Role::NormalUser,
        };

        self.users.create(&new).await.map_err(into_email_conflict)
    }

    /// Admin-side account creation with an explicit role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for rule violations,
    /// `AuthError::EmailTaken` for a duplicate email, and
    /// `AuthError::Repository` for database failures.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let new = prepare_new_user(name, email, password, address, role)?;
        self.users.create(&new).await.map_err(into_email_conflict)
    }

    /// Check an email/password pair and return the account on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email, a
    /// malformed email, or a wrong password - indistinguishably.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        // An email that doesn't parse can't belong to any account.
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let Some((user, hash)) = self.users.get_with_password_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Change an account's password after re-verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BadCurrentPassword` if the current password does
    /// not match, `AuthError::Validation` if the new password fails the
    /// policy, and `AuthError::UserNotFound` for a stale session.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let hash = self
            .users
            .get_password_hash(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(current_password, &hash)? {
            return Err(AuthError::BadCurrentPassword);
        }

        let new_hash = hash_password(new_password)?;
        self.users
            .update_password(user_id, &new_hash)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })
    }

    /// Update an account's name and address.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for rule violations and
    /// `AuthError::UserNotFound` for a stale session.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        name: &str,
        address: &str,
    ) -> Result<User, AuthError> {
        validate_name(name, NAME_MIN)?;
        validate_address(address)?;

        self.users
            .update_profile(user_id, name, address)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })
    }

    /// Fetch the account behind a verified session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate admin-path account fields and build the insertable record.
///
/// Uses the short (2 character) name minimum; self-service signup applies
/// its own stricter minimum before building the record itself.
pub(crate) fn prepare_new_user(
    name: &str,
    email: &str,
    password: &str,
    address: &str,
    role: Role,
) -> Result<NewUser, AuthError> {
    validate_name(name, NAME_MIN)?;
    validate_address(address)?;
    validate_password(password)?;
    let email = parse_email(email)?;

    Ok(NewUser {
        name: name.to_string(),
        email,
        password_hash: hash_password(password)?,
        address: address.to_string(),
        role,
    })
}

/// Hash a password with bcrypt.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|_| AuthError::PasswordHash)
}

/// Check a password against a stored bcrypt hash.
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|_| AuthError::PasswordHash)
}

/// Password policy: 8-16 characters, at least one uppercase letter and one
/// special character.
pub(crate) fn validate_password(password: &str) -> Result<(), AuthError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err(AuthError::Validation(format!(
            "Password must be {PASSWORD_MIN}-{PASSWORD_MAX} characters long"
        )));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(AuthError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(AuthError::Validation(
            "Password must contain at least one special character".to_string(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str, min: usize) -> Result<(), AuthError> {
    let len = name.chars().count();
    if !(min..=NAME_MAX).contains(&len) {
        return Err(AuthError::Validation(format!(
            "Name must be between {min} and {NAME_MAX} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_address(address: &str) -> Result<(), AuthError> {
    if address.chars().count() > ADDRESS_MAX {
        return Err(AuthError::Validation(format!(
            "Address must not exceed {ADDRESS_MAX} characters"
        )));
    }
    Ok(())
}

fn parse_email(email: &str) -> Result<Email, AuthError> {
    Email::parse(email).map_err(|_| AuthError::Validation("Invalid email address".to_string()))
}

fn into_email_conflict(err: RepositoryError) -> AuthError {
    match err {
        RepositoryError::Conflict(_) => AuthError::EmailTaken,
        other => AuthError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_policy_accepts_valid_passwords() {
        for password in ["Abcdefg1!", "P@ssword", "LongEnough#1234!", "A!aaaaaa"] {
            assert!(validate_password(password).is_ok(), "{password} rejected");
        }
    }

    #[test]
    fn password_policy_rejects_bad_passwords() {
        // Too short, too long, no uppercase, no special character.
        for password in [
            "Ab1!",
            "Abcdefghijklmnop1!",
            "abcdefg1!",
            "Abcdefg12",
        ] {
            assert!(validate_password(password).is_err(), "{password} accepted");
        }
    }

    #[test]
    fn special_characters_cover_the_full_set() {
        for special in SPECIAL_CHARS.chars() {
            let password = format!("Abcdefg{special}");
            assert!(validate_password(&password).is_ok(), "{password} rejected");
        }
    }

    #[test]
    fn signup_names_need_twenty_characters() {
        assert!(validate_name("Short Name", SIGNUP_NAME_MIN).is_err());
        assert!(validate_name("A Perfectly Long Name", SIGNUP_NAME_MIN).is_ok());
        assert!(validate_name(&"x".repeat(61), SIGNUP_NAME_MIN).is_err());
    }

    #[test]
    fn admin_names_allow_two_characters() {
        assert!(validate_name("Al", NAME_MIN).is_ok());
        assert!(validate_name("A", NAME_MIN).is_err());
    }

    #[test]
    fn address_is_capped_at_400() {
        assert!(validate_address(&"x".repeat(400)).is_ok());
        assert!(validate_address(&"x".repeat(401)).is_err());
        assert!(validate_address("").is_ok());
    }

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("Abcdefg1!").unwrap();
        assert!(verify_password("Abcdefg1!", &hash).unwrap());
        assert!(!verify_password("Wrong#pass1", &hash).unwrap());
    }
}
