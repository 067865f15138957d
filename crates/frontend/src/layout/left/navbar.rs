use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons;
use crate::system::auth::context::use_auth;
use contracts::system::routes::{nav_items, AppRoute};
use leptos::prelude::*;

fn icon_name(route: AppRoute) -> &'static str {
    match route {
        AppRoute::Dashboard => "dashboard",
        AppRoute::MisSolicitudes => "list",
        AppRoute::NuevoCliente => "user-plus",
        AppRoute::Pendientes(_) => "inbox",
        AppRoute::ManageUsers => "users",
        AppRoute::Perfil | AppRoute::Login => "user",
    }
}

/// Menu built from the route table for the signed-in user.
#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();

    let items = move || {
        auth_state.with(|s| s.user().map(nav_items).unwrap_or_default())
    };

    view! {
        <nav class="main-nav-bar">
            <ul>
                <For
                    each=items
                    key=|route| route.to_path()
                    children=move |route| {
                        let is_active = move || ctx.route.get() == route;
                        view! {
                            <li
                                class:active=is_active
                                on:click=move |_| ctx.navigate(route)
                            >
                                {icons::icon(icon_name(route))}
                                <span>{route.title()}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </nav>
    }
}
