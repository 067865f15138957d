//! Single declarative table of which session may open which page.
//!
//! The route guard and the navigation menu both read `ROUTE_TABLE`; nothing
//! else decides access.

use super::auth::SessionUser;
use super::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    Dashboard,
    MisSolicitudes,
    Pendientes(Role),
    ManageUsers,
    Perfil,
    NuevoCliente,
}

impl AppRoute {
    /// Parses a location path. Unknown paths and `/` resolve to the dashboard.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let mut parts = trimmed.trim_start_matches('/').splitn(2, '/');
        match (parts.next().unwrap_or(""), parts.next()) {
            ("login", None) => AppRoute::Login,
            ("dashboard", None) => AppRoute::Dashboard,
            ("mis-solicitudes", None) => AppRoute::MisSolicitudes,
            ("manage-users", None) => AppRoute::ManageUsers,
            ("perfil", None) => AppRoute::Perfil,
            ("nuevo-cliente", None) => AppRoute::NuevoCliente,
            ("solicitudes-pendientes", Some(rol)) => match rol.parse::<Role>() {
                Ok(role) if role.is_approver() => AppRoute::Pendientes(role),
                _ => AppRoute::Dashboard,
            },
            _ => AppRoute::Dashboard,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            AppRoute::Login => "/login".to_string(),
            AppRoute::Dashboard => "/dashboard".to_string(),
            AppRoute::MisSolicitudes => "/mis-solicitudes".to_string(),
            AppRoute::Pendientes(role) => format!("/solicitudes-pendientes/{}", role),
            AppRoute::ManageUsers => "/manage-users".to_string(),
            AppRoute::Perfil => "/perfil".to_string(),
            AppRoute::NuevoCliente => "/nuevo-cliente".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppRoute::Login => "Iniciar sesión",
            AppRoute::Dashboard => "Dashboard",
            AppRoute::MisSolicitudes => "Mis Solicitudes",
            AppRoute::Pendientes(Role::Director) => "Pendientes de Dirección",
            AppRoute::Pendientes(Role::Pedidos) => "Pendientes de Pedidos",
            AppRoute::Pendientes(_) => "Pendientes de Administración",
            AppRoute::ManageUsers => "Gestionar Usuarios",
            AppRoute::Perfil => "Perfil",
            AppRoute::NuevoCliente => "Nueva Solicitud",
        }
    }
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    AnySession,
    Roles(&'static [Role]),
    /// Admin role or the `manage_users` claim.
    UserAdmin,
}

impl Access {
    fn allows(&self, user: &SessionUser) -> bool {
        match self {
            Access::Public | Access::AnySession => true,
            Access::Roles(roles) => roles.contains(&user.role),
            Access::UserAdmin => user.can_manage_users(),
        }
    }
}

pub struct RouteRule {
    pub route: AppRoute,
    pub access: Access,
    /// Shown in the navigation bar when allowed.
    pub in_nav: bool,
}

pub const ROUTE_TABLE: &[RouteRule] = &[
    RouteRule { route: AppRoute::Login, access: Access::Public, in_nav: false },
    RouteRule { route: AppRoute::Dashboard, access: Access::AnySession, in_nav: true },
    RouteRule { route: AppRoute::MisSolicitudes, access: Access::AnySession, in_nav: true },
    RouteRule { route: AppRoute::NuevoCliente, access: Access::Roles(&[Role::Comercial]), in_nav: true },
    RouteRule {
        route: AppRoute::Pendientes(Role::Director),
        access: Access::Roles(&[Role::Director]),
        in_nav: true,
    },
    RouteRule {
        route: AppRoute::Pendientes(Role::Pedidos),
        access: Access::Roles(&[Role::Pedidos]),
        in_nav: true,
    },
    RouteRule { route: AppRoute::Pendientes(Role::Admin), access: Access::UserAdmin, in_nav: true },
    RouteRule { route: AppRoute::ManageUsers, access: Access::UserAdmin, in_nav: true },
    RouteRule { route: AppRoute::Perfil, access: Access::AnySession, in_nav: true },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectLogin,
    RedirectDashboard,
    /// Temporary password must be replaced first.
    RedirectProfile,
}

impl RouteDecision {
    pub fn target(&self) -> Option<AppRoute> {
        match self {
            RouteDecision::Allow => None,
            RouteDecision::RedirectLogin => Some(AppRoute::Login),
            RouteDecision::RedirectDashboard => Some(AppRoute::Dashboard),
            RouteDecision::RedirectProfile => Some(AppRoute::Perfil),
        }
    }
}

fn rule_for(route: AppRoute) -> Option<&'static RouteRule> {
    ROUTE_TABLE.iter().find(|r| r.route == route)
}

/// Decides whether `user` may open `route`.
pub fn decide(route: AppRoute, user: Option<&SessionUser>) -> RouteDecision {
    let Some(rule) = rule_for(route) else {
        return RouteDecision::RedirectDashboard;
    };

    if rule.access == Access::Public {
        // A signed-in user has nothing to do on the login page.
        return match user {
            Some(_) if route == AppRoute::Login => RouteDecision::RedirectDashboard,
            _ => RouteDecision::Allow,
        };
    }

    let Some(user) = user else {
        return RouteDecision::RedirectLogin;
    };
    if user.is_temporary_password && route != AppRoute::Perfil {
        return RouteDecision::RedirectProfile;
    }
    if rule.access.allows(user) {
        RouteDecision::Allow
    } else {
        RouteDecision::RedirectDashboard
    }
}

/// Menu entries for `user`, in table order.
pub fn nav_items(user: &SessionUser) -> Vec<AppRoute> {
    ROUTE_TABLE
        .iter()
        .filter(|r| r.in_nav && r.access.allows(user))
        .map(|r| r.route)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::roles::Permission;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            email: format!("{}@svan.es", role),
            name: String::new(),
            role,
            is_temporary_password: false,
            permissions: vec![],
        }
    }

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::MisSolicitudes,
            AppRoute::Pendientes(Role::Director),
            AppRoute::Pendientes(Role::Pedidos),
            AppRoute::Pendientes(Role::Admin),
            AppRoute::ManageUsers,
            AppRoute::Perfil,
            AppRoute::NuevoCliente,
        ];
        for r in routes {
            assert_eq!(AppRoute::from_path(&r.to_path()), r);
        }
    }

    #[test]
    fn unknown_paths_fall_back_to_dashboard() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::Dashboard);
        assert_eq!(
            AppRoute::from_path("/solicitudes-pendientes/comercial"),
            AppRoute::Dashboard
        );
        assert_eq!(AppRoute::from_path("/perfil/"), AppRoute::Perfil);
    }

    #[test]
    fn anonymous_users_go_to_login() {
        assert_eq!(decide(AppRoute::Dashboard, None), RouteDecision::RedirectLogin);
        assert_eq!(decide(AppRoute::Login, None), RouteDecision::Allow);
        assert_eq!(
            decide(AppRoute::Login, Some(&user(Role::Admin))),
            RouteDecision::RedirectDashboard
        );
    }

    #[test]
    fn pending_queue_only_for_its_role() {
        let director = user(Role::Director);
        assert_eq!(
            decide(AppRoute::Pendientes(Role::Director), Some(&director)),
            RouteDecision::Allow
        );
        assert_eq!(
            decide(AppRoute::Pendientes(Role::Pedidos), Some(&director)),
            RouteDecision::RedirectDashboard
        );
        assert_eq!(
            decide(AppRoute::ManageUsers, Some(&director)),
            RouteDecision::RedirectDashboard
        );
        assert_eq!(
            decide(AppRoute::NuevoCliente, Some(&user(Role::Comercial))),
            RouteDecision::Allow
        );
    }

    #[test]
    fn claim_grants_admin_navigation_without_email_checks() {
        let mut owner = user(Role::Comercial);
        owner.email = "fernando@svan.es".into();
        assert_eq!(
            decide(AppRoute::ManageUsers, Some(&owner)),
            RouteDecision::RedirectDashboard
        );
        owner.permissions.push(Permission::ManageUsers);
        assert_eq!(decide(AppRoute::ManageUsers, Some(&owner)), RouteDecision::Allow);
        assert_eq!(
            decide(AppRoute::Pendientes(Role::Admin), Some(&owner)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn claim_holder_sees_admin_queue_but_cannot_act_on_it() {
        use crate::domain::a001_solicitud::aggregate::tests::fixture;
        use crate::domain::a001_solicitud::{ApprovalDraft, Decision, TerminoPago};

        let mut owner = user(Role::Comercial);
        owner.permissions.push(Permission::ManageUsers);
        let s = fixture("pendiente_admin");

        assert_eq!(
            decide(AppRoute::Pendientes(Role::Admin), Some(&owner)),
            RouteDecision::Allow
        );
        assert!(!owner.can_act_on(&s.estado));
        assert!(user(Role::Admin).can_act_on(&s.estado));

        let mut draft = ApprovalDraft::new(Decision::Aprobar);
        draft.termino_pago = Some(TerminoPago::ALL[0]);
        assert!(draft.compose(owner.role, &s).is_err());
        assert!(draft.compose(Role::Admin, &s).is_ok());
    }

    #[test]
    fn temporary_password_forces_profile() {
        let mut u = user(Role::Pedidos);
        u.is_temporary_password = true;
        assert_eq!(decide(AppRoute::Dashboard, Some(&u)), RouteDecision::RedirectProfile);
        assert_eq!(decide(AppRoute::Perfil, Some(&u)), RouteDecision::Allow);
        assert_eq!(RouteDecision::RedirectProfile.target(), Some(AppRoute::Perfil));
    }

    #[test]
    fn nav_follows_the_table() {
        assert_eq!(
            nav_items(&user(Role::Director)),
            vec![
                AppRoute::Dashboard,
                AppRoute::MisSolicitudes,
                AppRoute::Pendientes(Role::Director),
                AppRoute::Perfil,
            ]
        );
        let admin_nav = nav_items(&user(Role::Admin));
        assert!(admin_nav.contains(&AppRoute::ManageUsers));
        assert!(admin_nav.contains(&AppRoute::Pendientes(Role::Admin)));
        assert!(!admin_nav.contains(&AppRoute::NuevoCliente));
        assert!(nav_items(&user(Role::Comercial)).contains(&AppRoute::NuevoCliente));
    }

    #[test]
    fn every_nav_item_passes_the_guard() {
        for role in Role::ALL {
            let u = user(role);
            for route in nav_items(&u) {
                assert_eq!(decide(route, Some(&u)), RouteDecision::Allow, "{route:?}");
            }
        }
    }
}
