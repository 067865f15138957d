//! TopHeader - application top bar: sidebar toggle, title, user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use contracts::system::routes::AppRoute;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        do_logout(set_auth_state);
        ctx.navigate(AppRoute::Login);
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title="Mostrar/ocultar menú"
                >
                    {icon("list")}
                </button>
                <span class="top-header__title">"Alta de Clientes"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.with(|s| s.user()
                            .map(|u| format!("{} · {}", u.display_name(), u.role.title()))
                            .unwrap_or_default())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
