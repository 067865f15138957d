use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role, the authorization key of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Comercial,
    Director,
    Pedidos,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Comercial, Role::Director, Role::Pedidos, Role::Admin];

    /// Roles that hold a stage of the approval chain, in chain order.
    pub const APPROVERS: [Role; 3] = [Role::Director, Role::Pedidos, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Comercial => "comercial",
            Role::Director => "director",
            Role::Pedidos => "pedidos",
            Role::Admin => "admin",
        }
    }

    /// Human title used in headers and the user admin table.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Comercial => "Comercial",
            Role::Director => "Director Comercial",
            Role::Pedidos => "Responsable de Pedidos",
            Role::Admin => "Responsable de Administración",
        }
    }

    pub fn is_approver(&self) -> bool {
        !matches!(self, Role::Comercial)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comercial" => Ok(Role::Comercial),
            "director" => Ok(Role::Director),
            "pedidos" => Ok(Role::Pedidos),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Rol desconocido: {}", other)),
        }
    }
}

/// Explicit claims carried by the user record, on top of the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Admin-level navigation: user management and the admin queue.
    ManageUsers,
}

impl Permission {
    /// Unknown claim names are ignored rather than rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manage_users" => Some(Permission::ManageUsers),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!("Director".parse::<Role>(), Ok(Role::Director));
        assert_eq!(" pedidos ".parse::<Role>(), Ok(Role::Pedidos));
        assert!("informatico".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_as_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"comercial\"").unwrap();
        assert_eq!(role, Role::Comercial);
    }

    #[test]
    fn only_comercial_is_not_an_approver() {
        assert!(!Role::Comercial.is_approver());
        assert!(Role::APPROVERS.iter().all(|r| r.is_approver()));
    }
}
