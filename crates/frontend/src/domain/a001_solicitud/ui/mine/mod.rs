//! Requests created by the signed-in user.

use super::row::SolicitudRow;
use crate::domain::a001_solicitud::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::estado_badge::EstadoBadge;
use crate::shared::components::sortable_header::SortableHeaderCell;
use crate::shared::components::status_message::ErrorMessage;
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, sort_list};
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_auth;
use contracts::system::roles::Role;
use contracts::system::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn approval_marks(aprobaciones: [bool; 3]) -> String {
    ["D", "P", "A"]
        .iter()
        .zip(aprobaciones.iter())
        .map(|(stage, done)| format!("{}{}", stage, if *done { "✓" } else { "·" }))
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn MisSolicitudes() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let rows = RwSignal::new(Vec::<SolicitudRow>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("fecha_creacion".to_string());
    let sort_ascending = RwSignal::new(false);

    let fetch = move || {
        let Some(email) = auth_state.with_untracked(|s| s.user().map(|u| u.email.clone())) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            match api::fetch_por_usuario(&email).await {
                Ok(list) => {
                    rows.set(list.iter().map(SolicitudRow::from).collect());
                    error.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    fetch();

    let visible = move || {
        let mut list = rows.with(|r| filter_list(r, &search.get()));
        sort_list(&mut list, &sort_field.get(), sort_ascending.get());
        list
    };

    let is_comercial = move || auth_state.with(|s| s.role() == Some(Role::Comercial));

    view! {
        <PageFrame page_id="a001_solicitud--mine" category=PAGE_CAT_LIST>
            <PageHeader title="Mis Solicitudes">
                <Show when=is_comercial>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ctx.navigate(AppRoute::NuevoCliente)
                    >
                        {icon("user-plus")}
                        "Nueva solicitud"
                    </Button>
                </Show>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Actualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="filter-bar">
                    <Input value=search placeholder="Buscar por cliente, CIF o población" />
                </div>

                <ErrorMessage message=error />

                {move || if loading.get() && rows.with(|r| r.is_empty()) {
                    view! { <Spinner label="Cargando..." /> }.into_any()
                } else if rows.with(|r| r.is_empty()) {
                    view! { <p class="empty-state">"Todavía no ha creado ninguna solicitud."</p> }.into_any()
                } else {
                    view! {
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <SortableHeaderCell label="Cliente" field="cliente" sort_field=sort_field sort_ascending=sort_ascending />
                                    <SortableHeaderCell label="Población" field="poblacion" sort_field=sort_field sort_ascending=sort_ascending />
                                    <SortableHeaderCell label="Método de pago" field="metodo_pago" sort_field=sort_field sort_ascending=sort_ascending />
                                    <SortableHeaderCell label="Fecha" field="fecha_creacion" sort_field=sort_field sort_ascending=sort_ascending />
                                    <SortableHeaderCell label="Estado" field="estado" sort_field=sort_field sort_ascending=sort_ascending />
                                    <TableHeaderCell>"Aprobaciones"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=visible
                                    key=|row| row.id.clone()
                                    children=move |row| view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{row.cliente}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.poblacion}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.metodo_pago}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.fecha_display}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout><EstadoBadge estado=row.estado /></TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{approval_marks(row.aprobaciones)}</TableCellLayout></TableCell>
                                        </TableRow>
                                    }
                                />
                            </TableBody>
                        </Table>
                    }.into_any()
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_marks() {
        assert_eq!(approval_marks([true, false, false]), "D✓ P· A·");
        assert_eq!(approval_marks([true, true, true]), "D✓ P✓ A✓");
    }
}
