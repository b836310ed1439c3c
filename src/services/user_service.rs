use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{IssuedToken, PasswordHasher, Principal, TokenService};
use crate::database::{DatabaseError, Repository};
use crate::filter::{Filter, Page};
use crate::models::user::normalize_identity;
use crate::models::{Credentials, Registration, User, UserChanges, UserView};
use crate::services::authz::ensure_owner;
use crate::services::{ServiceError, ServiceResult};

const MIN_USERNAME_LEN: usize = 4;
const MIN_PASSWORD_LEN: usize = 8;
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Accounts, login and token refresh.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn Repository<User>>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl UserService {
    pub fn new(users: Arc<dyn Repository<User>>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self { users, hasher, tokens }
    }

    pub async fn register(&self, registration: Registration) -> ServiceResult<UserView> {
        let email = normalize_identity(&registration.email);
        let username = normalize_identity(&registration.username);
        validate_identity(&email, &username)?;
        validate_password(&registration.password)?;

        if self.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict(format!("Email {email} is already registered")));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            username,
            password_hash: self.hasher.hash(&registration.password).await?,
            image_url: registration.image_url.trim().to_string(),
        };
        self.users.upsert(&user.id, &user).await?;
        tracing::info!("Registered user {}", user.id);
        Ok(UserView::from(user))
    }

    /// Unknown email and wrong password fail the same way.
    pub async fn login(&self, credentials: Credentials) -> ServiceResult<IssuedToken> {
        let email = normalize_identity(&credentials.email);
        let Some(user) = self.find_by_email(&email).await? else {
            tracing::warn!("Login failed for unknown email");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };
        if !self.hasher.verify(&credentials.password, &user.password_hash).await? {
            tracing::warn!("Login failed for user {}", user.id);
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        Ok(self.tokens.issue(&user)?)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<UserView> {
        Ok(UserView::from(self.users.find_one(id).await?))
    }

    pub async fn me(&self, principal: &Principal) -> ServiceResult<UserView> {
        self.get(&principal.user_id).await
    }

    pub async fn update(&self, principal: &Principal, id: &str, changes: UserChanges) -> ServiceResult<UserView> {
        ensure_owner(principal, id, &format!("user {id}"))?;

        let email = normalize_identity(&changes.email);
        let username = normalize_identity(&changes.username);
        validate_identity(&email, &username)?;
        if let Some(password) = &changes.password {
            validate_password(password)?;
        }

        let mut user = self.users.find_one(id).await?;
        if let Some(other) = self.find_by_email(&email).await? {
            if other.id != user.id {
                return Err(ServiceError::Conflict(format!("Email {email} is already registered")));
            }
        }

        if let Some(password) = &changes.password {
            user.password_hash = self.hasher.hash(password).await?;
        }
        user.email = email;
        user.username = username;
        user.image_url = changes.image_url.trim().to_string();

        self.users.upsert(id, &user).await?;
        Ok(UserView::from(user))
    }

    /// Re-issues a token for a caller that still exists.
    pub async fn refresh(&self, principal: &Principal) -> ServiceResult<IssuedToken> {
        let user = match self.users.find_one(&principal.user_id).await {
            Ok(user) => user,
            Err(DatabaseError::NotFound(_)) => {
                return Err(ServiceError::Unauthorized("account no longer exists".to_string()))
            }
            Err(other) => return Err(other.into()),
        };
        Ok(self.tokens.issue(&user)?)
    }

    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let filter = Filter::new().eq("email", email)?;
        let page = Page::new(0, 1)?;
        Ok(self.users.search(&filter, page, None).await?.into_iter().next())
    }
}

fn validate_identity(email: &str, username: &str) -> ServiceResult<()> {
    if !looks_like_email(email) {
        return Err(ServiceError::Validation(format!("'{email}' is not a valid email address")));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ServiceError::Validation(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}
