//! Authorization policy oracle
//!
//! `allow(role, resource, action)` is the only question the HTTP layer asks.
//! [`StaticPolicy`] answers it from a Casbin-style CSV table:
//!
//! ```text
//! # p, role, resource, action
//! p, seller, product, create
//! p, buyer, order, create
//! ```

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

/// Pluggable allow/deny decision
pub trait PolicyOracle: Send + Sync {
    fn allow(&self, role: &str, resource: &str, action: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed policy rule on line {line}: {content}")]
    Malformed { line: usize, content: String },
}

/// Exact-match table of `(role, resource, action)` grants
#[derive(Debug, Clone, Default)]
pub struct StaticPolicy {
    rules: HashSet<(String, String, String)>,
}

impl StaticPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style grant
    pub fn grant(
        mut self,
        role: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.rules
            .insert((role.into(), resource.into(), action.into()));
        self
    }

    /// Parse `p, role, resource, action` lines; `#` comments and blank lines are skipped
    pub fn from_csv(content: &str) -> Result<Self, PolicyError> {
        let mut policy = Self::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            match parts.as_slice() {
                ["p", role, resource, action]
                    if !role.is_empty() && !resource.is_empty() && !action.is_empty() =>
                {
                    policy = policy.grant(*role, *resource, *action);
                }
                _ => {
                    return Err(PolicyError::Malformed {
                        line: idx + 1,
                        content: line.to_string(),
                    });
                }
            }
        }
        Ok(policy)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_csv(&content)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PolicyOracle for StaticPolicy {
    fn allow(&self, role: &str, resource: &str, action: &str) -> bool {
        self.rules
            .contains(&(role.to_string(), resource.to_string(), action.to_string()))
    }
}
