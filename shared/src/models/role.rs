//! Staff Role Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Staff role carried in the bearer token's `role` claim
///
/// Tokens store the role as a plain string so that roles unknown to this build
/// still verify; they simply never satisfy a role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: &'static [Role] = &[Role::Employee, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles() {
        assert_eq!("employee".parse::<Role>(), Ok(Role::Employee));
        assert_eq!(" Manager ".parse::<Role>(), Ok(Role::Manager));
        assert_eq!(
            "guest".parse::<Role>(),
            Err(UnknownRole("guest".to_string()))
        );
    }
}
