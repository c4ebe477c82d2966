//! Role gate for staff routes

use shared::Role;

use super::CurrentUser;
use crate::security_log;
use crate::utils::AppError;

/// Set of roles admitted to a route group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    allowed: Vec<Role>,
}

impl RoleGate {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        let mut allowed: Vec<Role> = allowed.into_iter().collect();
        allowed.sort_by_key(|r| r.as_str());
        allowed.dedup();
        Self { allowed }
    }

    #[cfg(test)]
    fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// Roles outside the set, including ones this build does not know, are refused
    pub fn authorize(&self, user: &CurrentUser) -> Result<(), AppError> {
        if user.has_any_role(&self.allowed) {
            return Ok(());
        }

        security_log!(
            "WARN",
            "permission_denied",
            user_id = user.id.clone(),
            role = user.role.clone()
        );
        Err(AppError::forbidden("Insufficient role"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> CurrentUser {
        CurrentUser {
            id: "u1".to_string(),
            name: "Ann".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_admits_listed_roles() {
        let gate = RoleGate::new([Role::Employee, Role::Manager]);
        assert!(gate.authorize(&user("employee")).is_ok());
        assert!(gate.authorize(&user("manager")).is_ok());
    }

    #[test]
    fn test_refuses_others() {
        let gate = RoleGate::new([Role::Manager]);
        assert!(matches!(
            gate.authorize(&user("employee")),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            gate.authorize(&user("guest")),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            gate.authorize(&user("")),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_dedups() {
        let gate = RoleGate::new([Role::Manager, Role::Manager, Role::Employee]);
        assert_eq!(gate.allowed().len(), 2);
    }
}
