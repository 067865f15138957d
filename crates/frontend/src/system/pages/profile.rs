//! Own profile: display name and password. A temporary password keeps the
//! user here until it is replaced.

use contracts::system::routes::AppRoute;
use contracts::system::users::{ChangePasswordDto, UpdateProfileDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::status_message::{ErrorMessage, SuccessMessage};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DETAIL};
use crate::system::auth::context::{update_session, use_auth};
use crate::system::users::api;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let nombre = RwSignal::new(
        auth_state.with_untracked(|s| s.user().map(|u| u.name.clone()).unwrap_or_default()),
    );
    let profile_error = RwSignal::new(None::<String>);
    let profile_ok = RwSignal::new(None::<String>);

    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let password_error = RwSignal::new(None::<String>);
    let password_ok = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let is_temporary = move || auth_state.with(|s| s.user().map(|u| u.is_temporary_password).unwrap_or(false));

    // Server copy may have a fresher name than the one stored at login.
    spawn_local(async move {
        match api::fetch_me().await {
            Ok(me) => {
                nombre.set(me.nombre_completo.clone());
                update_session(set_auth_state, |s| s.user.name = me.nombre_completo);
            }
            Err(e) => log::warn!("Failed to load profile: {}", e),
        }
    });

    let save_profile = move |_| {
        let dto = UpdateProfileDto {
            nombre_completo: nombre.get_untracked().trim().to_string(),
        };
        if dto.nombre_completo.is_empty() {
            profile_error.set(Some("El nombre no puede estar vacío".to_string()));
            return;
        }
        profile_error.set(None);
        profile_ok.set(None);
        spawn_local(async move {
            match api::update_me(&dto).await {
                Ok(me) => {
                    update_session(set_auth_state, |s| s.user.name = me.nombre_completo);
                    profile_ok.set(Some("Perfil actualizado".to_string()));
                }
                Err(e) => profile_error.set(Some(e.to_string())),
            }
        });
    };

    let change_password = move |_| {
        if new_password.get_untracked() != confirm_password.get_untracked() {
            password_error.set(Some("Las contraseñas no coinciden".to_string()));
            return;
        }
        let dto = ChangePasswordDto {
            current_password: current_password.get_untracked(),
            new_password: new_password.get_untracked(),
        };
        if let Err(e) = dto.validate() {
            password_error.set(Some(e));
            return;
        }
        saving.set(true);
        password_error.set(None);
        password_ok.set(None);
        spawn_local(async move {
            match api::change_password(&dto).await {
                Ok(()) => {
                    let was_temporary = auth_state
                        .with_untracked(|s| s.user().map(|u| u.is_temporary_password).unwrap_or(false));
                    update_session(set_auth_state, |s| s.password_changed());
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    password_ok.set(Some("Contraseña cambiada".to_string()));
                    if was_temporary {
                        ctx.navigate(AppRoute::Dashboard);
                    }
                }
                Err(e) => password_error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    let email = move || auth_state.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());
    let role = move || auth_state.with(|s| s.user().map(|u| u.role.title()).unwrap_or_default());

    view! {
        <PageFrame page_id="sys_profile--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Perfil" />

            <div class="page__content form">
                <Show when=is_temporary>
                    <div class="alert alert--warning">
                        "Está usando una contraseña temporal. Cámbiela para continuar."
                    </div>
                </Show>

                <fieldset class="form__section">
                    <legend>"Datos personales"</legend>
                    <div class="form__group">
                        <Label>"Email"</Label>
                        <span>{email}</span>
                    </div>
                    <div class="form__group">
                        <Label>"Rol"</Label>
                        <span>{role}</span>
                    </div>
                    <div class="form__group">
                        <Label>"Nombre completo"</Label>
                        <Input value=nombre />
                    </div>
                    <ErrorMessage message=profile_error />
                    <SuccessMessage message=profile_ok />
                    <Button appearance=ButtonAppearance::Primary on_click=save_profile>
                        "Guardar"
                    </Button>
                </fieldset>

                <fieldset class="form__section">
                    <legend>"Cambiar contraseña"</legend>
                    <div class="form__group">
                        <Label>"Contraseña actual"</Label>
                        <Input value=current_password input_type=InputType::Password />
                    </div>
                    <div class="form__group">
                        <Label>"Nueva contraseña"</Label>
                        <Input value=new_password input_type=InputType::Password />
                    </div>
                    <div class="form__group">
                        <Label>"Repetir nueva contraseña"</Label>
                        <Input value=confirm_password input_type=InputType::Password />
                    </div>
                    <ErrorMessage message=password_error />
                    <SuccessMessage message=password_ok />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=change_password
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Guardando..." } else { "Cambiar contraseña" }}
                    </Button>
                </fieldset>
            </div>
        </PageFrame>
    }
}
