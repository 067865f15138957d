use contracts::system::auth::SessionUser;
use contracts::system::routes::{decide, AppRoute, RouteDecision};
use leptos::prelude::*;

use super::context::use_auth;
use crate::layout::global_context::AppGlobalContext;

/// Follows redirects until a route the user may open. Every redirect target
/// is reachable for its own condition, so this settles in a few steps.
pub fn resolve_route(route: AppRoute, user: Option<&SessionUser>) -> AppRoute {
    let mut current = route;
    for _ in 0..4 {
        match decide(current, user).target() {
            Some(next) if next != current => current = next,
            _ => return current,
        }
    }
    current
}

/// Renders `children` when the user may open `route`; otherwise redirects.
#[component]
pub fn RouteGuard(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let decision = Memo::new(move |_| auth_state.with(|s| decide(route, s.user())));

    Effect::new(move |_| {
        if let Some(target) = decision.get().target() {
            log::debug!("Route {:?} not allowed, redirecting to {:?}", route, target);
            ctx.navigate(target);
        }
    });

    view! {
        <Show when=move || decision.get() == RouteDecision::Allow>
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::roles::Role;

    fn user(role: Role, temporary: bool) -> SessionUser {
        SessionUser {
            email: format!("{}@svan.es", role),
            name: String::new(),
            role,
            is_temporary_password: temporary,
            permissions: vec![],
        }
    }

    #[test]
    fn test_resolve_without_session() {
        assert_eq!(resolve_route(AppRoute::Dashboard, None), AppRoute::Login);
        assert_eq!(resolve_route(AppRoute::Login, None), AppRoute::Login);
    }

    #[test]
    fn test_resolve_wrong_role_goes_to_dashboard() {
        let director = user(Role::Director, false);
        assert_eq!(
            resolve_route(AppRoute::Pendientes(Role::Pedidos), Some(&director)),
            AppRoute::Dashboard
        );
        assert_eq!(
            resolve_route(AppRoute::Pendientes(Role::Director), Some(&director)),
            AppRoute::Pendientes(Role::Director)
        );
    }

    #[test]
    fn test_resolve_temporary_password_goes_to_profile() {
        let comercial = user(Role::Comercial, true);
        assert_eq!(resolve_route(AppRoute::NuevoCliente, Some(&comercial)), AppRoute::Perfil);
        assert_eq!(resolve_route(AppRoute::Login, Some(&comercial)), AppRoute::Perfil);
    }
}
