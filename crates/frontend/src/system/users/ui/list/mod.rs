mod state;

use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::sortable_header::SortableHeaderCell;
use crate::shared::components::status_message::ErrorMessage;
use crate::shared::format::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, sort_list};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_SYSTEM};
use crate::system::auth::context::use_auth;
use crate::system::users::api;
use crate::system::users::ui::details::{CreateUserDialog, EditUserDialog};
use state::create_state;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let state = create_state();
    let all_users = RwSignal::new(Vec::<User>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let create_open = RwSignal::new(false);
    let edit_open = RwSignal::new(false);
    let editing_user = RwSignal::new(None::<User>);

    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new(state.with_untracked(|s| s.sort_field.clone()));
    let sort_ascending = RwSignal::new(state.with_untracked(|s| s.sort_ascending));

    Effect::new(move |_| {
        let query = search.get();
        let field = sort_field.get();
        let ascending = sort_ascending.get();
        state.update(|s| {
            s.search_query = query;
            s.sort_field = field;
            s.sort_ascending = ascending;
        });
    });

    let load_data = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(data) => all_users.set(data),
                Err(e) => error.set(Some(format!("No se pudieron cargar los usuarios: {}", e))),
            }
            loading.set(false);
        });
    };

    load_data();

    let visible = move || {
        let s = state.get();
        let mut data = all_users.with(|u| filter_list(u, &s.search_query));
        sort_list(&mut data, &s.sort_field, s.sort_ascending);
        data
    };

    let own_email = move || auth_state.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());

    let edit = move |user: User| {
        editing_user.set(Some(user));
        edit_open.set(true);
    };

    let remove = move |user: User| {
        if !confirm(&format!("¿Eliminar el usuario {}?", user.email)) {
            return;
        }
        spawn_local(async move {
            match api::delete_user(user.id).await {
                Ok(()) => {
                    log::info!("User {} deleted", user.email);
                    load_data();
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let reload = Callback::new(move |_| load_data());

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <PageHeader title="Gestionar Usuarios">
                <Badge>{move || all_users.with(|u| u.len()).to_string()}</Badge>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| create_open.set(true)>
                    {icon("user-plus")}
                    " Nuevo usuario"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load_data()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                </Button>
            </PageHeader>

            <div class="page__content">
                <ErrorMessage message=error />

                <div class="filter-bar">
                    <Input value=search placeholder="Email, nombre o rol..." />
                </div>

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Email" field="email" sort_field=sort_field sort_ascending=sort_ascending />
                            <SortableHeaderCell label="Nombre" field="nombre_completo" sort_field=sort_field sort_ascending=sort_ascending />
                            <SortableHeaderCell label="Rol" field="rol" sort_field=sort_field sort_ascending=sort_ascending />
                            <SortableHeaderCell label="Estado" field="activo" sort_field=sort_field sort_ascending=sort_ascending />
                            <SortableHeaderCell label="Último acceso" field="ultimo_acceso" sort_field=sort_field sort_ascending=sort_ascending />
                            <SortableHeaderCell label="Creado" field="creado_en" sort_field=sort_field sort_ascending=sort_ascending />
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=visible
                            key=|u| (u.id, u.nombre_completo.clone(), u.rol, u.activo)
                            children=move |user| {
                                let for_edit = user.clone();
                                let for_delete = user.clone();
                                let is_self = {
                                    let email = user.email.clone();
                                    move || own_email() == email
                                };
                                let last_login = user
                                    .ultimo_acceso
                                    .as_deref()
                                    .map(format_datetime)
                                    .unwrap_or_else(|| "-".to_string());
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <span style="font-weight: 500;">{user.email.clone()}</span>
                                                {user.is_temporary_password.then(|| view! {
                                                    <Badge>"contraseña temporal"</Badge>
                                                })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout truncate=true>{user.nombre_completo.clone()}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{user.rol.title()}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if user.activo {
                                                    view! { <span class="badge badge--green">"Activo"</span> }.into_any()
                                                } else {
                                                    view! { <span class="badge badge--neutral">"Inactivo"</span> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout>{last_login}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_datetime(&user.creado_en)}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| edit(for_edit.clone())
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    disabled=Signal::derive(is_self)
                                                    on_click=move |_| remove(for_delete.clone())
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </Flex>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>

            <CreateUserDialog open=create_open on_created=reload />
            <EditUserDialog open=edit_open user=editing_user on_saved=reload />
        </PageFrame>
    }
}
