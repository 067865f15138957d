use crate::shared::list_utils::{contains_ci, Searchable, Sortable};
use contracts::system::users::User;
use leptos::prelude::*;
use std::cmp::Ordering;

#[derive(Clone, Debug)]
pub struct UsersListState {
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            sort_field: "email".to_string(),
            sort_ascending: true,
        }
    }
}

pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "nombre_completo" => self
                .nombre_completo
                .to_lowercase()
                .cmp(&other.nombre_completo.to_lowercase()),
            "rol" => self.rol.as_str().cmp(other.rol.as_str()),
            "activo" => self.activo.cmp(&other.activo),
            "creado_en" => self.creado_en.cmp(&other.creado_en),
            "ultimo_acceso" => self
                .ultimo_acceso
                .as_deref()
                .unwrap_or("")
                .cmp(other.ultimo_acceso.as_deref().unwrap_or("")),
            _ => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
        }
    }
}

impl Searchable for User {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.email, filter)
            || contains_ci(&self.nombre_completo, filter)
            || contains_ci(self.rol.as_str(), filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{filter_list, sort_list};
    use serde_json::json;

    fn user(email: &str, nombre: &str, rol: &str) -> User {
        serde_json::from_value(json!({
            "id": uuid::Uuid::new_v4(),
            "email": email,
            "nombre_completo": nombre,
            "rol": rol,
            "creado_en": "2024-01-01T00:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_users_sort_and_filter() {
        let mut users = vec![
            user("pedidos@svan.es", "Pablo Pedidos", "pedidos"),
            user("admin@svan.es", "Ana Admin", "admin"),
            user("director@svan.es", "Diego Director", "director"),
        ];
        sort_list(&mut users, "email", true);
        assert_eq!(users[0].email, "admin@svan.es");
        assert!(users.iter().all(|u| u.activo));

        sort_list(&mut users, "nombre_completo", false);
        assert_eq!(users[0].nombre_completo, "Pablo Pedidos");

        assert_eq!(filter_list(&users, "director").len(), 1);
        assert_eq!(filter_list(&users, "SVAN").len(), 3);
    }
}
