use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_parse};

use crate::error::{UserError, UserResult};

/// One-way credential hashing.
///
/// `hash` output is a self-describing PHC string (algorithm, cost, salt,
/// digest) that is safe to persist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> UserResult<String>;

    /// `Ok(false)` on mismatch; `Err` only when `hashed` cannot be parsed.
    async fn verify(&self, password: &str, hashed: &str) -> UserResult<bool>;
}

/// Argon2id work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Environment variables:
/// - `HASH_MEMORY_KIB` (default: 19456)
/// - `HASH_ITERATIONS` (default: 2)
/// - `HASH_PARALLELISM` (default: 1)
impl FromEnv for HasherConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            memory_kib: env_parse("HASH_MEMORY_KIB", "19456")?,
            iterations: env_parse("HASH_ITERATIONS", "2")?,
            parallelism: env_parse("HASH_PARALLELISM", "1")?,
        })
    }
}

/// Argon2id hasher; work runs on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: HasherConfig) -> UserResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| UserError::PasswordHash(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> UserResult<String> {
        let password = password.to_owned();
        let argon2 = self.argon2();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| UserError::PasswordHash(e.to_string()))
        })
        .await
        .map_err(|e| UserError::PasswordHash(format!("Hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: &str, hashed: &str) -> UserResult<bool> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        let argon2 = self.argon2();

        tokio::task::spawn_blocking(move || {
            let parsed =
                PasswordHash::new(&hashed).map_err(|e| UserError::PasswordHash(e.to_string()))?;

            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(UserError::PasswordHash(e.to_string())),
            }
        })
        .await
        .map_err(|e| UserError::PasswordHash(format!("Verification task failed: {}", e)))?
    }
}
