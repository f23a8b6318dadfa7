use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => f.write_str("CUSTOMER"),
            Role::Admin => f.write_str("ADMIN"),
        }
    }
}

/// The caller of a ledger operation, as vouched for by the session layer.
/// The ledger never sees credentials, only this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn customer(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Customer)
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins and the owning user may act on a resource
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin() || self.user_id == owner_id
    }

    pub fn require_admin(&self, action: &str) -> LedgerResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized(format!("only admins may {}", action)))
        }
    }
}
