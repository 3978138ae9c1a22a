use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedPrincipal;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for registration, login and principal lookup.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated username, password and role
    ///
    /// # Returns
    /// Signed token for the new account
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<String, UserError>;

    /// Verify a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user or password mismatch
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, username: &str, password: &str) -> Result<String, UserError>;

    /// Resolve the live principal for a token subject.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - Subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn load_principal(&self, username: &str) -> Result<AuthenticatedPrincipal, UserError>;
}

/// Credential store for the user aggregate.
///
/// Implementations must enforce username uniqueness themselves (a unique
/// constraint or equivalent atomic check), not rely on callers looking first.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
