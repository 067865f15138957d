//! Create and edit dialogs for user accounts.

use contracts::system::roles::Role;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::status_message::ErrorMessage;
use crate::system::users::api;

fn role_options() -> impl IntoView {
    Role::ALL
        .iter()
        .map(|r| view! { <option value=r.as_str()>{r.title()}</option> })
        .collect_view()
}

/// Blank password field means "leave unchanged".
fn build_update(nombre: String, rol: &str, activo: bool, password: String) -> UpdateUserDto {
    let password = password.trim().to_string();
    UpdateUserDto {
        nombre_completo: Some(nombre.trim().to_string()),
        rol: rol.parse::<Role>().ok(),
        activo: Some(activo),
        password: (!password.is_empty()).then_some(password),
    }
}

#[component]
pub fn CreateUserDialog(open: RwSignal<bool>, on_created: Callback<()>) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let nombre = RwSignal::new(String::new());
    let rol = RwSignal::new(Role::Comercial.as_str().to_string());
    let activo = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    // Shown once; the API never returns it again.
    let temporary_password = RwSignal::new(None::<String>);

    let reset = move || {
        email.set(String::new());
        nombre.set(String::new());
        rol.set(Role::Comercial.as_str().to_string());
        activo.set(true);
        error.set(None);
        temporary_password.set(None);
    };

    Effect::new(move |_| {
        if open.get() {
            reset();
        }
    });

    let submit = move |_| {
        let Ok(role) = rol.get_untracked().parse::<Role>() else {
            error.set(Some("Seleccione un rol".to_string()));
            return;
        };
        let dto = CreateUserDto {
            email: email.get_untracked().trim().to_string(),
            nombre_completo: nombre.get_untracked().trim().to_string(),
            rol: role,
            activo: activo.get_untracked(),
        };
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match api::create_user(&dto).await {
                Ok(resp) => {
                    log::info!("User {} created", resp.user.email);
                    temporary_password.set(Some(resp.temporary_password));
                    on_created.run(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    let close = move |_| {
        open.set(false);
        reset();
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Crear usuario"</DialogTitle>
                    <DialogContent>
                        {move || match temporary_password.get() {
                            Some(pwd) => view! {
                                <div class="alert alert--success">
                                    <p>"Usuario creado. Contraseña temporal:"</p>
                                    <code class="temporary-password">{pwd}</code>
                                    <p>"Comuníquela al usuario; deberá cambiarla en su primer acceso."</p>
                                </div>
                            }.into_any(),
                            None => view! {
                                <div class="form">
                                    <div class="form__group">
                                        <Label>"Email *"</Label>
                                        <Input value=email input_type=InputType::Email />
                                    </div>
                                    <div class="form__group">
                                        <Label>"Nombre completo *"</Label>
                                        <Input value=nombre />
                                    </div>
                                    <div class="form__group">
                                        <Label>"Rol"</Label>
                                        <Select value=rol>{role_options()}</Select>
                                    </div>
                                    <Checkbox checked=activo label="Activo" />
                                    <ErrorMessage message=error />
                                </div>
                            }.into_any(),
                        }}
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=close>
                            {move || if temporary_password.get().is_some() { "Cerrar" } else { "Cancelar" }}
                        </Button>
                        <Show when=move || temporary_password.get().is_none()>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=submit
                                disabled=Signal::derive(move || saving.get())
                            >
                                {move || if saving.get() { "Creando..." } else { "Crear" }}
                            </Button>
                        </Show>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn EditUserDialog(
    open: RwSignal<bool>,
    user: RwSignal<Option<User>>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let nombre = RwSignal::new(String::new());
    let rol = RwSignal::new(String::new());
    let activo = RwSignal::new(true);
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        if let Some(u) = user.get() {
            nombre.set(u.nombre_completo.clone());
            rol.set(u.rol.as_str().to_string());
            activo.set(u.activo);
            password.set(String::new());
            error.set(None);
        }
    });

    let submit = move |_| {
        let Some(id) = user.with_untracked(|u| u.as_ref().map(|u| u.id)) else {
            return;
        };
        let dto = build_update(
            nombre.get_untracked(),
            &rol.get_untracked(),
            activo.get_untracked(),
            password.get_untracked(),
        );
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match api::update_user(id, &dto).await {
                Ok(updated) => {
                    log::info!("User {} updated", updated.email);
                    open.set(false);
                    on_saved.run(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        {move || user.with(|u| u.as_ref().map(|u| format!("Editar usuario: {}", u.email)).unwrap_or_default())}
                    </DialogTitle>
                    <DialogContent>
                        <div class="form">
                            <div class="form__group">
                                <Label>"Nombre completo"</Label>
                                <Input value=nombre />
                            </div>
                            <div class="form__group">
                                <Label>"Rol"</Label>
                                <Select value=rol>{role_options()}</Select>
                            </div>
                            <Checkbox checked=activo label="Activo" />
                            <div class="form__group">
                                <Label>"Nueva contraseña (opcional)"</Label>
                                <Input value=password input_type=InputType::Password />
                            </div>
                            <ErrorMessage message=error />
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancelar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || saving.get())
                        >
                            {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
