use crate::config::EmailValidation;
use crate::errors::UserError;
use crate::store::UserStore;
use crate::types::User;
use crate::validators::is_email_valid;

/// Parse a user from a request body.
pub fn unmarshal_user(body: &[u8]) -> Result<User, UserError> {
    let user: User = serde_json::from_slice(body)?;
    tracing::debug!("User: {:?}", user);
    Ok(user)
}

/// Check the fields a stored user must have.
pub fn validate_user(user: &User, email_validation: EmailValidation) -> Result<(), UserError> {
    if user.email.is_empty() {
        return Err(UserError::Validation("email is required"));
    }

    if email_validation == EmailValidation::Format && !is_email_valid(&user.email) {
        return Err(UserError::Validation("email has an invalid format"));
    }

    Ok(())
}

/// Get a single user by email.
pub async fn fetch_user<S: UserStore>(store: &S, email: &str) -> Result<User, UserError> {
    if email.is_empty() {
        return Err(UserError::Validation("no email query parameter"));
    }

    store.fetch_user(email).await
}

/// Get every user in the table.
pub async fn fetch_users<S: UserStore>(store: &S) -> Result<Vec<User>, UserError> {
    store.fetch_users().await
}

/// Create a user, replacing any existing record with the same email.
pub async fn create_user<S: UserStore>(
    store: &S,
    user: &User,
    email_validation: EmailValidation,
) -> Result<(), UserError> {
    validate_user(user, email_validation)?;
    store.put_user(user).await
}

/// Overwrite an existing user with `user`.
///
/// Not atomic: the existence check and the write are separate calls, so a
/// delete landing in between lets the write recreate the record.
pub async fn update_user<S: UserStore>(
    store: &S,
    user: &User,
    email_validation: EmailValidation,
) -> Result<(), UserError> {
    validate_user(user, email_validation)?;
    store.fetch_user(&user.email).await?;
    store.put_user(user).await
}

/// Delete a user and return the record as it was before deletion.
pub async fn delete_user<S: UserStore>(store: &S, email: &str) -> Result<User, UserError> {
    let existing = fetch_user(store, email).await?;

    store.delete_user(email).await?;
    tracing::info!("User deleted: {}", email);

    Ok(existing)
}
