//! Account Service - registration, login and profile lookup

use serde::{Deserialize, Serialize};

use crate::domain::errors::DUPLICATE_EMAIL;
use crate::domain::inputs::normalize_email;
use crate::domain::{DomainError, LoginInput, RegisterInput, UserId, UserRepository};
use crate::infrastructure::auth::{create_jwt, hash_password, verify_password};
use crate::models::User;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// User fields plus a bearer token, returned by register and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    fn issue(user: User) -> Result<Self, DomainError> {
        let token = create_jwt(user.id).map_err(DomainError::Internal)?;
        Ok(Self {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        })
    }
}

pub async fn register(
    users: &dyn UserRepository,
    input: RegisterInput,
) -> Result<AuthResponse, DomainError> {
    let account = input.validate()?;

    if users.find_credentials(&account.email).await?.is_some() {
        return Err(DomainError::Conflict(DUPLICATE_EMAIL.to_string()));
    }

    let password_hash = hash_password(&account.password).map_err(DomainError::Internal)?;
    let user = users
        .create(account.name, account.email, password_hash)
        .await?;

    tracing::info!("Registered user {}", user.id);
    AuthResponse::issue(user)
}

pub async fn login(
    users: &dyn UserRepository,
    input: LoginInput,
) -> Result<AuthResponse, DomainError> {
    let email = normalize_email(&input.email);

    let Some(credentials) = users.find_credentials(&email).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(DomainError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
    };

    match verify_password(&input.password, &credentials.password_hash) {
        Ok(true) => {
            tracing::info!("User {} logged in", credentials.user.id);
            AuthResponse::issue(credentials.user)
        }
        Ok(false) => {
            tracing::warn!("Password verification failed for user {}", credentials.user.id);
            Err(DomainError::Unauthenticated(INVALID_CREDENTIALS.to_string()))
        }
        Err(e) => {
            tracing::error!(
                "Stored password hash for user {} is unreadable: {}",
                credentials.user.id,
                e
            );
            Err(DomainError::Unauthenticated(INVALID_CREDENTIALS.to_string()))
        }
    }
}

/// Profile of the authenticated user
pub async fn get_profile(users: &dyn UserRepository, id: UserId) -> Result<User, DomainError> {
    users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User"))
}
