use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::hasher::{Argon2Hasher, CredentialHasher};
use crate::models::{RegisterUser, UserResponse};
use crate::password_policy;
use crate::repository::UserRepository;

/// Service layer for user registration
pub struct UserService<R: UserRepository, H: CredentialHasher = Argon2Hasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: CredentialHasher> Clone for UserService<R, H> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_hasher(repository, Argon2Hasher::default())
    }
}

impl<R: UserRepository, H: CredentialHasher> UserService<R, H> {
    pub fn with_hasher(repository: R, hasher: H) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher: Arc::new(hasher),
        }
    }

    /// Register a new user.
    ///
    /// Each step short-circuits: presence, password policy, allow-list,
    /// duplicate check, hash, insert. Nothing touches the store until the
    /// request is locally valid, and the allow-list answer is given before
    /// anything about existing accounts.
    pub async fn register(&self, input: RegisterUser) -> UserResult<UserResponse> {
        let RegisterUser { email, password } = input;
        let email = email.ok_or(UserError::MissingField("email"))?;
        let password = password.ok_or(UserError::MissingField("password"))?;

        password_policy::evaluate(&password)?;

        if self.repository.find_allowed_by_email(&email).await?.is_none() {
            tracing::info!("Registration rejected: email not on allow-list");
            return Err(UserError::NotAllowlisted);
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Err(UserError::AlreadyRegistered);
        }

        let password_hash = self.hasher.hash(&password).await?;

        let user = self
            .repository
            .insert_user(&email, &password_hash)
            .await
            .map_err(|e| match e {
                UserError::ConstraintViolation(detail) => {
                    tracing::info!(%detail, "Registration lost a race on a duplicate email");
                    UserError::AlreadyRegistered
                }
                other => other,
            })?;

        tracing::info!(user_id = user.id, "Registered user");
        Ok(user.into())
    }

    /// Check a password against the stored hash of `email`.
    ///
    /// Unknown emails and wrong passwords both yield `false`.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> UserResult<bool> {
        match self.repository.find_by_email(email).await? {
            Some(user) => self.hasher.verify(password, &user.password_hash).await,
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::{HasherConfig, MockCredentialHasher};
    use crate::models::{AllowedEmail, User};
    use crate::password_policy::PolicyError;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use mockall::Sequence;

    const EMAIL: &str = "allowed@email.com";
    const PASSWORD: &str = "1Aa!2Bb@";

    fn allowed() -> AllowedEmail {
        AllowedEmail {
            id: 1,
            email: EMAIL.into(),
        }
    }

    fn stored_user(id: i32) -> User {
        User {
            id,
            email: EMAIL.into(),
            password_hash: "$argon2id$stub".into(),
        }
    }

    fn cheap_hasher() -> Argon2Hasher {
        Argon2Hasher::new(HasherConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    /// Repository and hasher mocks that fail the test if touched
    fn untouched() -> (MockUserRepository, MockCredentialHasher) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_allowed_by_email().never();
        repo.expect_find_by_email().never();
        repo.expect_insert_user().never();

        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash().never();

        (repo, hasher)
    }

    #[tokio::test]
    async fn test_register_runs_steps_in_order() {
        let mut seq = Sequence::new();
        let mut repo = MockUserRepository::new();
        let mut hasher = MockCredentialHasher::new();

        repo.expect_find_allowed_by_email()
            .withf(|email| email == EMAIL)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(allowed())));
        repo.expect_find_by_email()
            .withf(|email| email == EMAIL)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        hasher
            .expect_hash()
            .withf(|password| password == PASSWORD)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("$argon2id$hashed".into()));
        repo.expect_insert_user()
            .withf(|email, hash| email == EMAIL && hash == "$argon2id$hashed")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|email, hash| {
                Ok(User {
                    id: 42,
                    email: email.to_string(),
                    password_hash: hash.to_string(),
                })
            });

        let service = UserService::with_hasher(repo, hasher);
        let response = service.register(RegisterUser::new(EMAIL, PASSWORD)).await.unwrap();

        assert_eq!(
            response,
            UserResponse {
                id: 42,
                email: EMAIL.into()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_email_reported_before_password() {
        let (repo, hasher) = untouched();
        let service = UserService::with_hasher(repo, hasher);

        let result = service.register(RegisterUser::default()).await;
        assert!(matches!(result, Err(UserError::MissingField("email"))));
    }

    #[tokio::test]
    async fn test_missing_email_wins_over_bad_password() {
        let (repo, hasher) = untouched();
        let service = UserService::with_hasher(repo, hasher);

        let input = RegisterUser {
            email: None,
            password: Some("short".into()),
        };
        let result = service.register(input).await;
        assert!(matches!(result, Err(UserError::MissingField("email"))));
    }

    #[tokio::test]
    async fn test_missing_password() {
        let (repo, hasher) = untouched();
        let service = UserService::with_hasher(repo, hasher);

        let input = RegisterUser {
            email: Some(EMAIL.into()),
            password: None,
        };
        let result = service.register(input).await;
        assert!(matches!(result, Err(UserError::MissingField("password"))));
    }

    #[tokio::test]
    async fn test_policy_failure_skips_store() {
        let (repo, hasher) = untouched();
        let service = UserService::with_hasher(repo, hasher);

        let result = service.register(RegisterUser::new(EMAIL, "1234567")).await;
        assert!(matches!(
            result,
            Err(UserError::InvalidPassword(PolicyError::TooShort))
        ));
    }

    #[tokio::test]
    async fn test_not_allowlisted_skips_duplicate_check() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_allowed_by_email().times(1).returning(|_| Ok(None));
        repo.expect_find_by_email().never();
        repo.expect_insert_user().never();
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash().never();

        let service = UserService::with_hasher(repo, hasher);
        let result = service.register(RegisterUser::new(EMAIL, PASSWORD)).await;

        assert!(matches!(result, Err(UserError::NotAllowlisted)));
    }

    #[tokio::test]
    async fn test_already_registered_skips_hashing() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_allowed_by_email()
            .returning(|_| Ok(Some(allowed())));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(1))));
        repo.expect_insert_user().never();
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash().never();

        let service = UserService::with_hasher(repo, hasher);
        let result = service.register(RegisterUser::new(EMAIL, PASSWORD)).await;

        assert!(matches!(result, Err(UserError::AlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_racing_insert_becomes_already_registered() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_allowed_by_email()
            .returning(|_| Ok(Some(allowed())));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert_user().returning(|_, _| {
            Err(UserError::ConstraintViolation(
                "duplicate key value violates unique constraint \"users_email_key\"".into(),
            ))
        });
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash().returning(|_| Ok("$argon2id$hashed".into()));

        let service = UserService::with_hasher(repo, hasher);
        let result = service.register(RegisterUser::new(EMAIL, PASSWORD)).await;

        assert!(matches!(result, Err(UserError::AlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_hasher_failure_propagates_without_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_allowed_by_email()
            .returning(|_| Ok(Some(allowed())));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert_user().never();
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(UserError::PasswordHash("allocation failed".into())));

        let service = UserService::with_hasher(repo, hasher);
        let result = service.register(RegisterUser::new(EMAIL, PASSWORD)).await;

        assert!(matches!(result, Err(UserError::PasswordHash(_))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_unchanged() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_allowed_by_email()
            .returning(|_| Err(UserError::Internal("pool timed out".into())));
        let mut hasher = MockCredentialHasher::new();
        hasher.expect_hash().never();

        let service = UserService::with_hasher(repo, hasher);
        let result = service.register(RegisterUser::new(EMAIL, PASSWORD)).await;

        assert!(matches!(result, Err(UserError::Internal(msg)) if msg == "pool timed out"));
    }

    #[tokio::test]
    async fn test_register_twice_with_real_hasher() {
        let repo = InMemoryUserRepository::new();
        repo.allow(EMAIL).await;
        let service = UserService::with_hasher(repo.clone(), cheap_hasher());

        let first = service.register(RegisterUser::new(EMAIL, PASSWORD)).await.unwrap();
        assert_eq!(first.id, 1);

        let second = service
            .register(RegisterUser::new(EMAIL, "9Zz&8Yy^"))
            .await;
        assert!(matches!(second, Err(UserError::AlreadyRegistered)));

        let stored = repo.find_by_email(EMAIL).await.unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert_ne!(stored.password_hash, PASSWORD);
    }

    #[tokio::test]
    async fn test_verify_credentials_after_register() {
        let repo = InMemoryUserRepository::new();
        repo.allow(EMAIL).await;
        let service = UserService::with_hasher(repo, cheap_hasher());

        service.register(RegisterUser::new(EMAIL, PASSWORD)).await.unwrap();

        assert!(service.verify_credentials(EMAIL, PASSWORD).await.unwrap());
        assert!(!service.verify_credentials(EMAIL, "1Aa!2Bb#").await.unwrap());
        assert!(!service.verify_credentials("other@email.com", PASSWORD).await.unwrap());
    }
}
