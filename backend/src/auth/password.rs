//! Password hashing using argon2
//!
//! New digests are Argon2id PHC strings. Digests written by the previous
//! bcrypt-based revision of the service are still accepted by `verify`.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers use the `_async`
//! variants, which run on the blocking thread pool.

use crate::config::PasswordConfig;
use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tracing::warn;

/// Ceilings for work factors read back from stored digests. A digest asking
/// for more than this is treated as corrupt rather than computed.
const MAX_MEMORY_KIB: u32 = 256 * 1024;
const MAX_ITERATIONS: u32 = 16;
const MAX_PARALLELISM: u32 = 16;
const MAX_BCRYPT_COST: u32 = 14;

/// Password hashing service
///
/// Uses Argon2id with a configurable work factor. Both `argon2` and `bcrypt`
/// compare digests in constant time.
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    /// Build a hasher with the given work factor
    pub fn new(config: &PasswordConfig) -> Result<Self> {
        if config.memory_kib > MAX_MEMORY_KIB
            || config.iterations > MAX_ITERATIONS
            || config.parallelism > MAX_PARALLELISM
        {
            anyhow::bail!("Password hashing parameters exceed the verification ceiling");
        }
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| anyhow::anyhow!("Invalid password hashing parameters: {}", e))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored digest (blocking operation)
    ///
    /// Returns false for a wrong password and for a digest that cannot be
    /// parsed; a corrupted row must not take request handling down.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        if is_bcrypt(digest) {
            return verify_bcrypt(password, digest);
        }

        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Unreadable password digest");
                return false;
            }
        };

        // The digest carries its own parameters; the configured work factor
        // only applies to new hashes.
        match stored_argon2(&parsed) {
            Ok(argon2) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(reason) => {
                warn!(reason = %reason, "Rejected stored password digest");
                false
            }
        }
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(&self, password: String, digest: String) -> Result<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

/// Rebuild the hasher a stored digest was made with, refusing work factors
/// above the ceilings
fn stored_argon2(parsed: &PasswordHash<'_>) -> Result<Argon2<'static>, String> {
    let algorithm = Algorithm::new(parsed.algorithm.as_str()).map_err(|e| e.to_string())?;
    let version = match parsed.version {
        Some(v) => Version::try_from(v).map_err(|e| e.to_string())?,
        None => Version::default(),
    };
    let params = Params::try_from(parsed).map_err(|e| e.to_string())?;

    if params.m_cost() > MAX_MEMORY_KIB
        || params.t_cost() > MAX_ITERATIONS
        || params.p_cost() > MAX_PARALLELISM
    {
        return Err(format!(
            "work factor m={},t={},p={} above ceiling",
            params.m_cost(),
            params.t_cost(),
            params.p_cost()
        ));
    }

    Ok(Argon2::new(algorithm, version, params))
}

/// Legacy digests look like `$2b$<cost>$<salt+hash>`
fn verify_bcrypt(password: &str, digest: &str) -> bool {
    let cost = digest.get(4..6).and_then(|c| c.parse::<u32>().ok());
    match cost {
        Some(cost) if cost <= MAX_BCRYPT_COST => bcrypt::verify(password, digest)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Unreadable bcrypt digest");
                false
            }),
        _ => {
            warn!(cost = ?cost, "Rejected bcrypt digest cost");
            false
        }
    }
}

fn is_bcrypt(digest: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| digest.starts_with(prefix))
}
