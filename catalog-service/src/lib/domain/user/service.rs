use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::ExtraClaims;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedPrincipal;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AuthenticationServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthenticationServicePort with dependency injection.
pub struct AuthenticationService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthenticationService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_token(&self, user: &User) -> Result<String, UserError> {
        self.authenticator
            .issue_token(user.username.as_str(), role_claims(user), Utc::now())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))
    }

    fn reject(&self, password: &str) -> UserError {
        self.authenticator.reject_unknown(password);
        UserError::InvalidCredentials
    }
}

fn role_claims(user: &User) -> ExtraClaims {
    let mut extra = ExtraClaims::new();
    extra.insert(
        "role".to_string(),
        serde_json::Value::from(user.role.as_str()),
    );
    extra
}

#[async_trait]
impl<UR> AuthenticationServicePort for AuthenticationService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<String, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        // The store's unique constraint decides races between concurrent registrations
        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            role = %created_user.role,
            "User registered"
        );

        self.issue_token(&created_user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<String, UserError> {
        let Ok(username) = Username::new(username.to_string()) else {
            return Err(self.reject(password));
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login for unknown username");
            return Err(self.reject(password));
        };

        self.authenticator
            .authenticate(
                password,
                &user.password_hash,
                user.username.as_str(),
                role_claims(&user),
                Utc::now(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(username = %user.username, "Login with wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    UserError::Unknown(format!("Password verification failed: {}", err))
                }
                AuthenticationError::TokenError(err) => {
                    UserError::Unknown(format!("Token generation failed: {}", err))
                }
            })
    }

    async fn load_principal(&self, username: &str) -> Result<AuthenticatedPrincipal, UserError> {
        let not_found = || UserError::NotFoundByUsername(username.to_string());

        let username = Username::new(username.to_string()).map_err(|_| not_found())?;

        self.repository
            .find_by_username(&username)
            .await?
            .map(|user| AuthenticatedPrincipal::from_user(&user))
            .ok_or_else(not_found)
    }
}
