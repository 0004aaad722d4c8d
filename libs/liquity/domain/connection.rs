//! Deployment facts about the connected contracts and this frontend

use chrono::{DateTime, Utc};
use ethers::types::Address;
use serde::{Deserialize, Serialize};

const COMMIT_URL_PREFIX: &str = "https://github.com/liquity/dev/commit/";
const COMMIT_HASH_LEN: usize = 40;
const SHORT_HASH_LEN: usize = 7;

/// Connection to a deployed set of contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    /// Contracts version (usually a git commit hash)
    pub version: String,
    pub deployment_date: DateTime<Utc>,
    /// Address this frontend registered under; zero when running untagged
    pub frontend_tag: Address,
}

impl ConnectionInfo {
    pub fn is_untagged(&self) -> bool {
        self.frontend_tag == Address::zero()
    }
}

/// How this frontend was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildProfile {
    Development,
    Production { version: Option<String> },
}

/// A version string resolved against the GitHub commit format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRef {
    Known { short: String, url: String },
    Unknown,
}

impl CommitRef {
    /// Recognizes any version containing a 40-digit lowercase hex hash
    pub fn parse(version: Option<&str>) -> Self {
        match version {
            Some(v) if contains_commit_hash(v) => CommitRef::Known {
                short: v.chars().take(SHORT_HASH_LEN).collect(),
                url: format!("{}{}", COMMIT_URL_PREFIX, v),
            },
            _ => CommitRef::Unknown,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CommitRef::Known { short, .. } => short,
            CommitRef::Unknown => "unknown",
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            CommitRef::Known { url, .. } => Some(url),
            CommitRef::Unknown => None,
        }
    }
}

fn contains_commit_hash(s: &str) -> bool {
    let is_hex = |b: &u8| b.is_ascii_digit() || (b'a'..=b'f').contains(b);
    s.as_bytes()
        .windows(COMMIT_HASH_LEN)
        .any(|window| window.iter().all(is_hex))
}
