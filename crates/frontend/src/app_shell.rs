//! Application shell: root page selection
//!
//! `AppShell` picks the page for the current route and runs it through
//! `RouteGuard`; the login page renders without the main layout.

use crate::dashboards::d001_resumen::ui::ResumenDashboard;
use crate::domain::a001_solicitud::ui::create::NuevoClienteForm;
use crate::domain::a001_solicitud::ui::list::SolicitudesPendientes;
use crate::domain::a001_solicitud::ui::mine::MisSolicitudes;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RouteGuard;
use crate::system::pages::login::LoginPage;
use crate::system::pages::profile::ProfilePage;
use crate::system::users::ui::list::UsersListPage;
use contracts::system::routes::AppRoute;
use leptos::prelude::*;

fn page_for(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <ResumenDashboard /> }.into_any(),
        AppRoute::MisSolicitudes => view! { <MisSolicitudes /> }.into_any(),
        AppRoute::Pendientes(role) => view! { <SolicitudesPendientes role=role /> }.into_any(),
        AppRoute::NuevoCliente => view! { <NuevoClienteForm /> }.into_any(),
        AppRoute::ManageUsers => view! { <UsersListPage /> }.into_any(),
        AppRoute::Perfil => view! { <ProfilePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();

    // Runs once: URL <-> route signal.
    ctx.init_router_integration();

    // Only sign-in/sign-out rebuilds the page, not every session update.
    let signed_in = Memo::new(move |_| auth_state.with(|s| s.is_authenticated()));

    view! {
        {move || {
            let route = ctx.route.get();
            if route == AppRoute::Login {
                view! {
                    <RouteGuard route=route>
                        {page_for(route)}
                    </RouteGuard>
                }.into_any()
            } else if signed_in.get() {
                view! {
                    <Shell>
                        <RouteGuard route=route>
                            {page_for(route)}
                        </RouteGuard>
                    </Shell>
                }.into_any()
            } else {
                // Redirects to login.
                view! { <RouteGuard route=route>{page_for(route)}</RouteGuard> }.into_any()
            }
        }}
    }
}
