use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub nombre_completo: String,
    pub rol: Role,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub ultimo_acceso: Option<String>,
    pub creado_en: String,
    #[serde(default)]
    pub is_temporary_password: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub email: String,
    pub nombre_completo: String,
    pub rol: Role,
    pub activo: bool,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("El email es obligatorio".into());
        }
        if self.nombre_completo.trim().is_empty() {
            return Err("El nombre completo es obligatorio".into());
        }
        Ok(())
    }
}

/// The API generates the password and returns it once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user: User,
    pub temporary_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rol: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
    /// Admin reset; omitted when left blank in the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    pub nombre_completo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.current_password.is_empty() || self.new_password.is_empty() {
            return Err("Debe indicar la contraseña actual y la nueva".into());
        }
        if self.current_password == self.new_password {
            return Err("La nueva contraseña debe ser distinta de la actual".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_user_response() {
        let u: User = serde_json::from_value(json!({
            "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "email": "pedidos@svan.es",
            "nombre_completo": "Luis Pérez",
            "rol": "pedidos",
            "activo": true,
            "ultimo_acceso": null,
            "creado_en": "2024-01-10T08:00:00+00:00",
            "is_temporary_password": true
        }))
        .unwrap();
        assert_eq!(u.rol, Role::Pedidos);
        assert!(u.is_temporary_password);
    }

    #[test]
    fn update_omits_untouched_fields() {
        let dto = UpdateUserDto {
            activo: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&dto).unwrap(), json!({"activo": false}));
    }

    #[test]
    fn password_change_rules() {
        let same = ChangePasswordDto {
            current_password: "a".into(),
            new_password: "a".into(),
        };
        assert!(same.validate().is_err());
        let empty = ChangePasswordDto {
            current_password: "a".into(),
            new_password: String::new(),
        };
        assert!(empty.validate().is_err());
        let ok = ChangePasswordDto {
            current_password: "a".into(),
            new_password: "b".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn create_requires_email_and_name() {
        let dto = CreateUserDto {
            email: " ".into(),
            nombre_completo: "X".into(),
            rol: Role::Comercial,
            activo: true,
        };
        assert!(dto.validate().is_err());
    }
}
