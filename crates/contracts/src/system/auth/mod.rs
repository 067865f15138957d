use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::access;
use super::roles::{Permission, Role};
use crate::domain::a001_solicitud::EstadoSolicitud;

/// Form-encoded body of `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Raw `/token` response, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user_role: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub is_temporary_password: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No se recibió un token de acceso válido")]
    MissingToken,
    #[error("El servidor devolvió un rol no reconocido: {0}")]
    UnknownRole(String),
}

/// The signed-in user as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub is_temporary_password: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl SessionUser {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Admin-level navigation: the admin role or an explicit claim.
    pub fn can_manage_users(&self) -> bool {
        self.role == Role::Admin || self.has_permission(Permission::ManageUsers)
    }

    /// Approve/reject on a request in `estado`. Judged on the user's own
    /// role, whatever queue is on screen.
    pub fn can_act_on(&self, estado: &EstadoSolicitud) -> bool {
        access::can_act(self.role, estado)
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    /// Validates a `/token` response into a typed session.
    pub fn from_token_response(email: &str, response: TokenResponse) -> Result<Self, SessionError> {
        let token = response.access_token.trim().to_string();
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        let role: Role = response
            .user_role
            .parse()
            .map_err(|_| SessionError::UnknownRole(response.user_role.clone()))?;

        Ok(Self {
            token,
            user: SessionUser {
                email: email.trim().to_string(),
                name: response.user_name.unwrap_or_default(),
                role,
                is_temporary_password: response.is_temporary_password,
                permissions: response
                    .permissions
                    .iter()
                    .filter_map(|p| Permission::parse(p))
                    .collect(),
            },
        })
    }

    /// Called once the user has replaced a temporary password.
    pub fn password_changed(&mut self) {
        self.user.is_temporary_password = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(role: &str) -> TokenResponse {
        serde_json::from_value(json!({
            "access_token": "eyJhbGciOi",
            "token_type": "bearer",
            "user_role": role,
            "user_name": "Marta Gil",
            "is_temporary_password": false
        }))
        .unwrap()
    }

    #[test]
    fn builds_typed_session() {
        let s = Session::from_token_response("marta@svan.es", response("director")).unwrap();
        assert_eq!(s.token, "eyJhbGciOi");
        assert_eq!(s.user.role, Role::Director);
        assert_eq!(s.user.display_name(), "Marta Gil");
        assert!(!s.user.can_manage_users());
    }

    #[test]
    fn rejects_unknown_role_and_empty_token() {
        assert_eq!(
            Session::from_token_response("x@svan.es", response("informatico")),
            Err(SessionError::UnknownRole("informatico".into()))
        );
        let mut r = response("admin");
        r.access_token = " ".into();
        assert_eq!(
            Session::from_token_response("x@svan.es", r),
            Err(SessionError::MissingToken)
        );
    }

    #[test]
    fn manage_users_comes_from_role_or_claim() {
        let admin = Session::from_token_response("a@svan.es", response("admin")).unwrap();
        assert!(admin.user.can_manage_users());

        let mut r = response("comercial");
        r.permissions = vec!["manage_users".into(), "something_else".into()];
        let owner = Session::from_token_response("owner@svan.es", r).unwrap();
        assert_eq!(owner.user.permissions, vec![Permission::ManageUsers]);
        assert!(owner.user.can_manage_users());
    }

    #[test]
    fn stored_session_shape_is_stable() {
        let mut s = Session::from_token_response("m@svan.es", response("pedidos")).unwrap();
        s.user.is_temporary_password = true;
        let raw = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, s);
        assert!(raw.contains("\"role\":\"pedidos\""));

        s.password_changed();
        assert!(!s.user.is_temporary_password);
    }
}
