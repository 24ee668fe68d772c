/*!
 * Lock Configuration
 *
 * Runtime selection of the primitive behind an adaptive lock
 */

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the lock kind
pub const LOCK_KIND_ENV: &str = "LOCK_KIND";
/// Environment variable holding the semaphore permit count
pub const LOCK_PERMITS_ENV: &str = "LOCK_SEMAPHORE_PERMITS";

/// Primitive selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockKind {
    /// Non-recursive exclusive mutex
    Mutex,
    /// Mutex the owning thread may re-enter
    Recursive,
    /// Shared readers, exclusive writer
    RwLock,
    /// Counting semaphore
    Semaphore,
    /// No exclusion at all
    Null,
    /// Pick from the permit count
    Auto,
}

/// Unknown lock kind in configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown lock kind '{0}'")]
    UnknownKind(String),

    #[error("invalid permit count '{0}'")]
    InvalidPermits(String),
}

impl FromStr for LockKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mutex" => Ok(LockKind::Mutex),
            "recursive" | "recursive_mutex" => Ok(LockKind::Recursive),
            "rwlock" | "rw_lock" | "rw" => Ok(LockKind::RwLock),
            "semaphore" | "sem" => Ok(LockKind::Semaphore),
            "null" | "none" => Ok(LockKind::Null),
            "auto" => Ok(LockKind::Auto),
            other => Err(ConfigError::UnknownKind(other.to_string())),
        }
    }
}

/// Lock configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Preferred primitive
    pub kind: LockKind,
    /// Initial permits when the semaphore is selected
    pub semaphore_permits: usize,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            kind: LockKind::Auto,
            semaphore_permits: 1,
        }
    }
}

impl LockConfig {
    /// Exclusive access, one holder at a time
    pub const fn exclusive() -> Self {
        Self {
            kind: LockKind::Mutex,
            semaphore_permits: 1,
        }
    }

    /// Read-mostly data
    pub const fn read_mostly() -> Self {
        Self {
            kind: LockKind::RwLock,
            semaphore_permits: 1,
        }
    }

    /// Single-threaded use, no locking cost
    pub const fn single_threaded() -> Self {
        Self {
            kind: LockKind::Null,
            semaphore_permits: 1,
        }
    }

    /// Bounded concurrency with `permits` holders, at least one
    pub const fn bounded(permits: usize) -> Self {
        Self {
            kind: LockKind::Semaphore,
            semaphore_permits: if permits == 0 { 1 } else { permits },
        }
    }

    /// Load from `LOCK_KIND` and `LOCK_SEMAPHORE_PERMITS`, defaults otherwise
    ///
    /// A permit count of zero is rejected: such a semaphore could never be
    /// acquired.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(kind) = std::env::var(LOCK_KIND_ENV) {
            config.kind = kind.parse()?;
        }

        if let Ok(permits) = std::env::var(LOCK_PERMITS_ENV) {
            config.semaphore_permits = permits
                .trim()
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .ok_or_else(|| ConfigError::InvalidPermits(permits.clone()))?;
        }

        Ok(config)
    }

    /// Resolve `Auto` to a concrete kind
    pub fn select_kind(&self) -> LockKind {
        match self.kind {
            LockKind::Auto => {
                // More than one permit only makes sense for a semaphore
                if self.semaphore_permits > 1 {
                    LockKind::Semaphore
                } else {
                    LockKind::Mutex
                }
            }
            other => other,
        }
    }
}
