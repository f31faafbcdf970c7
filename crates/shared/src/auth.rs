//! Authentication types for JWT-protected endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles of the SentinelFi RBAC matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// IT department head.
    #[serde(rename = "IT Head")]
    ItHead,
    /// Finance team member.
    Finance,
    /// Operations department head.
    #[serde(rename = "Operational Head")]
    OperationalHead,
    /// Chief executive.
    #[serde(rename = "CEO")]
    Ceo,
    /// User scoped to assigned projects.
    #[serde(rename = "Assigned Project User")]
    AssignedProjectUser,
}

impl Role {
    /// Roles allowed to draft and review budgets.
    pub const BUDGET_DRAFTERS: [Self; 2] = [Self::Admin, Self::Finance];

    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::ItHead => "IT Head",
            Self::Finance => "Finance",
            Self::OperationalHead => "Operational Head",
            Self::Ceo => "CEO",
            Self::AssignedProjectUser => "Assigned Project User",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User email.
    pub email: String,
    /// User's role.
    pub role: Role,
    /// Tenant the user belongs to.
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        email: &str,
        role: Role,
        tenant_id: Option<Uuid>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email: email.to_string(),
            role,
            tenant_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns `true` if the role is one of `allowed`.
    #[must_use]
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_sets_expiration_and_iat() {
        let user = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::minutes(30);
        let before = Utc::now().timestamp();
        let claims = Claims::new(user, "fin@sentinel.test", Role::Finance, None, expires_at);
        let after = Utc::now().timestamp();

        assert_eq!(claims.user_id(), user);
        assert!(claims.iat >= before);
        assert!(claims.iat <= after);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::OperationalHead).unwrap(),
            "\"Operational Head\""
        );
        let role: Role = serde_json::from_str("\"IT Head\"").unwrap();
        assert_eq!(role, Role::ItHead);
        assert_eq!(Role::AssignedProjectUser.to_string(), "Assigned Project User");
    }

    #[test]
    fn test_budget_drafter_roles() {
        let expires_at = Utc::now() + Duration::minutes(5);
        let finance = Claims::new(Uuid::new_v4(), "a@b.c", Role::Finance, None, expires_at);
        let ceo = Claims::new(Uuid::new_v4(), "a@b.c", Role::Ceo, None, expires_at);

        assert!(finance.has_any_role(&Role::BUDGET_DRAFTERS));
        assert!(!ceo.has_any_role(&Role::BUDGET_DRAFTERS));
    }
}
