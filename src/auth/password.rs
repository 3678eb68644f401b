use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::{config::PasswordConfig, errors::AppError};

/// Argon2id hashing with configured cost parameters.
#[derive(Clone)]
pub struct Password {
    params: Params,
    // Hash of a throwaway secret under the same params, used to burn the same
    // verify cost when there is no stored hash to check against.
    dummy_hash: String,
}

impl Password {
    pub fn new(config: &PasswordConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| {
            error!(error = %e, "invalid argon2 parameters");
            AppError::internal(e.to_string())
        })?;
        let mut password = Self {
            params,
            dummy_hash: String::new(),
        };
        password.dummy_hash = password.hash("userbase-dummy-secret")?;
        Ok(password)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                AppError::internal(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    /// Verification reads the cost parameters from the stored hash, so hashes
    /// made under older settings still verify.
    pub fn compare(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            AppError::internal(e.to_string())
        })?;
        Ok(self
            .argon2()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }

    /// Runs a full verify against the internal dummy hash and discards the
    /// result. Keeps "no such account" as slow as "wrong password".
    pub fn compare_dummy(&self, plain: &str) {
        let _ = self.compare(plain, &self.dummy_hash);
    }
}
