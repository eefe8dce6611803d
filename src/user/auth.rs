//! Password credentials

use anyhow::{bail, Result};
use rand::{rng, Rng};
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PLACEHOLDER_HASH_LEN: usize = 64;

/// A random A-z0-9 string
pub fn random_string(len: usize) -> String {
    let bytes = rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .collect::<Vec<u8>>();
    String::from_utf8_lossy(&bytes).to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialHasher {
    /// Placeholder written for users provisioned by an import. Never verifies.
    Locked,
}

impl FromStr for CredentialHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LOCKED" => Ok(CredentialHasher::Locked),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl fmt::Display for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialHasher::Locked => write!(f, "LOCKED"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCredentials {
    pub user_id: usize,
    pub hash: String,
    pub hasher: CredentialHasher,
}

impl PasswordCredentials {
    /// A credential that exists but can never be used to sign in. The
    /// owner has to set a real password through a separate flow.
    pub fn locked_placeholder(user_id: usize) -> Self {
        PasswordCredentials {
            user_id,
            hash: random_string(PLACEHOLDER_HASH_LEN),
            hasher: CredentialHasher::Locked,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.hasher, CredentialHasher::Locked)
    }

    pub fn verify(&self, _plain: &str) -> bool {
        match self.hasher {
            CredentialHasher::Locked => false,
        }
    }
}
