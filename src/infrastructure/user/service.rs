//! User service for registration

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::user::{
    validate_required, EmailMatching, NewUser, PasswordDigest, RegistrationError, User,
    UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_registration;

use super::password::PasswordHasher;

/// Request for registering a new user
///
/// Fields are optional so that absent values reach the presence check
/// instead of failing deserialization.
#[derive(Clone, Default)]
pub struct RegisterUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterUserRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

impl fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// User service for registration
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    email_matching: EmailMatching,
}

impl<R: UserRepository, H: PasswordHasher + 'static> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            email_matching: EmailMatching::default(),
        }
    }

    /// Set the email comparison policy
    pub fn with_email_matching(mut self, email_matching: EmailMatching) -> Self {
        self.email_matching = email_matching;
        self
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, RegistrationError> {
        let result = self.register_inner(request).await;

        match &result {
            Ok(user) => {
                info!(user_id = %user.id(), "User registered");
                record_registration("created");
            }
            Err(e) if e.is_client_error() => {
                warn!(reason = e.outcome(), "Registration rejected: {}", e);
                record_registration(e.outcome());
            }
            Err(e) => {
                error!(error = %e, "Registration failed");
                record_registration(e.outcome());
            }
        }

        result
    }

    async fn register_inner(&self, request: RegisterUserRequest) -> Result<User, RegistrationError> {
        let fields = validate_required(
            request.name.as_deref(),
            request.email.as_deref(),
            request.password.as_deref(),
        )?;

        let email = self.email_matching.normalize(fields.email);

        if self
            .repository
            .email_exists(&email)
            .await
            .map_err(RegistrationError::Persistence)?
        {
            return Err(RegistrationError::DuplicateEmail);
        }

        let digest = self.hash_password(fields.password.to_string()).await?;

        debug!(email = %email, "Persisting new user");

        // A conflict here means a concurrent registration won the race
        self.repository
            .insert(NewUser::new(fields.name, email, digest))
            .await
            .map_err(RegistrationError::from)
    }

    /// Hash on the blocking pool so the CPU cost does not stall the runtime
    async fn hash_password(&self, password: String) -> Result<PasswordDigest, RegistrationError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                RegistrationError::Hashing(DomainError::internal(format!(
                    "Hashing task failed: {}",
                    e
                )))
            })?
            .map_err(RegistrationError::Hashing)
    }

    /// Check that the user store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}
