//! Role-gated visibility and action rules for requests.
//!
//! Advisory only: the API re-checks every call, these rules decide what the
//! UI offers.

use crate::domain::a001_solicitud::EstadoSolicitud;

use super::roles::Role;

/// A request is in `role`'s queue iff `estado == "pendiente_" + role`.
pub fn is_visible_to(role: Role, estado: &EstadoSolicitud) -> bool {
    EstadoSolicitud::pending_for(role).as_ref() == Some(estado)
}

/// Approve/reject is offered exactly where the request is visible.
pub fn can_act(role: Role, estado: &EstadoSolicitud) -> bool {
    is_visible_to(role, estado)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ESTADOS: [&str; 7] = [
        "pendiente_director",
        "pendiente_pedidos",
        "pendiente_admin",
        "completado",
        "rechazado",
        "PENDIENTE_ADMIN",
        "borrador",
    ];

    #[test]
    fn visibility_matches_prefixed_role() {
        for role in Role::ALL {
            for raw in ALL_ESTADOS {
                let estado = EstadoSolicitud::parse(raw);
                let expected = estado.code() == format!("pendiente_{}", role);
                assert_eq!(is_visible_to(role, &estado), expected, "{role} / {raw}");
                assert_eq!(can_act(role, &estado), expected);
            }
        }
    }

    #[test]
    fn terminal_states_are_invisible_to_everyone() {
        for role in Role::ALL {
            assert!(!can_act(role, &EstadoSolicitud::Completado));
            assert!(!can_act(role, &EstadoSolicitud::Rechazado));
        }
    }
}
