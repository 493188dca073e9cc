//! Account signup and credential checks.
//!
//! Passwords are stored as Argon2id PHC strings. Login only verifies the
//! credentials; no session is established.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use validator::Validate;

use crate::domain::types::Username;
use crate::domain::user::{NewUser, User};
use crate::forms::auth::CredentialsForm;
use crate::forms::FormError;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` when the password does not match; errors only for a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Registers a new account.
pub fn signup<R>(repo: &R, form: CredentialsForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    form.validate().map_err(FormError::from)?;

    let username = Username::new(form.username)?;
    let password_hash = hash_password(&form.password).map_err(|err| {
        log::error!("Failed to hash password: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    let user = repo.create_user(&NewUser {
        username,
        password_hash,
    })?;
    log::info!("Registered user {}", user.username);

    Ok(user)
}

/// Checks the submitted credentials. Unknown users and wrong passwords are
/// indistinguishable to the caller.
pub fn login<R>(repo: &R, form: CredentialsForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    form.validate().map_err(FormError::from)?;

    let username = Username::new(form.username)?;
    let Some(user) = repo.get_user_by_username(&username)? else {
        log::debug!("Login attempt for unknown user {username}");
        return Err(ServiceError::Unauthorized);
    };

    match verify_password(&form.password, &user.password_hash) {
        Ok(true) => Ok(user),
        Ok(false) => {
            log::debug!("Wrong password for user {username}");
            Err(ServiceError::Unauthorized)
        }
        Err(err) => {
            log::error!("Stored password hash for {username} is unreadable: {err}");
            Err(ServiceError::Unauthorized)
        }
    }
}
