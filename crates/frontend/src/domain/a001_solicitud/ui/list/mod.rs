//! Approver queue: requests in `pendiente_{rol}` with approve/reject actions.

use super::approval::ApprovalDialog;
use super::row::SolicitudRow;
use crate::domain::a001_solicitud::api;
use crate::shared::components::estado_badge::EstadoBadge;
use crate::shared::components::status_message::ErrorMessage;
use crate::shared::format::format_euros;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_LIST};
use crate::system::auth::context::use_auth;
use contracts::domain::a001_solicitud::{Decision, Solicitud};
use contracts::system::roles::Role;
use contracts::system::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// `role` names the queue being viewed; actions follow the signed-in user's
/// own role, which differs for holders of the user-admin claim.
#[component]
pub fn SolicitudesPendientes(role: Role) -> impl IntoView {
    let (auth, _) = use_auth();
    let user = auth.with_untracked(|a| a.user().cloned());
    let actor = user.as_ref().map(|u| u.role).unwrap_or(role);
    if actor != role {
        log::debug!("{} viewing the {} queue read-only", actor, role);
    }
    let user = StoredValue::new(user);
    let items = RwSignal::new(Vec::<Solicitud>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let dialog_open = RwSignal::new(false);
    let target = RwSignal::new(None::<(Solicitud, Decision)>);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_pendientes(role).await {
                Ok(list) => {
                    log::debug!("{} pending for {}", list.len(), role);
                    items.set(list);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    let open_dialog = move |id: String, decision: Decision| {
        let found = items.with_untracked(|list| {
            list.iter().find(|s| s.id.as_string() == id).cloned()
        });
        if let Some(solicitud) = found {
            target.set(Some((solicitud, decision)));
            dialog_open.set(true);
        }
    };

    // No optimistic update: the queue is reloaded from the server.
    let on_done = Callback::new(move |_| fetch());

    fetch();

    let rows = move || items.with(|list| list.iter().map(SolicitudRow::from).collect::<Vec<_>>());

    view! {
        <PageFrame page_id="a001_solicitud--pending" category=PAGE_CAT_LIST>
            <PageHeader title=AppRoute::Pendientes(role).title() subtitle=role.title()>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Actualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <ErrorMessage message=error />

                {move || if loading.get() && items.with(|l| l.is_empty()) {
                    view! { <Spinner label="Cargando solicitudes..." /> }.into_any()
                } else if items.with(|l| l.is_empty()) {
                    view! { <p class="empty-state">"No hay solicitudes pendientes."</p> }.into_any()
                } else {
                    view! {
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Cliente"</TableHeaderCell>
                                    <TableHeaderCell>"CIF/NIF"</TableHeaderCell>
                                    <TableHeaderCell>"Población"</TableHeaderCell>
                                    <TableHeaderCell>"Método de pago"</TableHeaderCell>
                                    <TableHeaderCell>"Crédito"</TableHeaderCell>
                                    <TableHeaderCell>"Fecha"</TableHeaderCell>
                                    <TableHeaderCell>"Estado"</TableHeaderCell>
                                    <TableHeaderCell>"Acciones"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=rows
                                    key=|row| row.id.clone()
                                    children=move |row| {
                                        let id = StoredValue::new(row.id.clone());
                                        let actionable = user.with_value(|u| {
                                            u.as_ref().is_some_and(|u| u.can_act_on(&row.estado))
                                        });
                                        view! {
                                            <TableRow>
                                                <TableCell><TableCellLayout>{row.cliente}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.cif_nif}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.poblacion}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.metodo_pago}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {row.credito.map(format_euros).unwrap_or_else(|| "-".to_string())}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell><TableCellLayout>{row.fecha_display}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <TableCellLayout><EstadoBadge estado=row.estado /></TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <Show
                                                        when=move || actionable
                                                        fallback=|| view! { <span class="text-muted">"Solo lectura"</span> }
                                                    >
                                                    <Flex gap=FlexGap::Small>
                                                        <Button
                                                            appearance=ButtonAppearance::Primary
                                                            size=ButtonSize::Small
                                                            on_click=move |_| open_dialog(id.get_value(), Decision::Aprobar)
                                                        >
                                                            {icon("check")}
                                                            "Aprobar"
                                                        </Button>
                                                        <Button
                                                            appearance=ButtonAppearance::Secondary
                                                            size=ButtonSize::Small
                                                            on_click=move |_| open_dialog(id.get_value(), Decision::Rechazar)
                                                        >
                                                            {icon("x")}
                                                            "Rechazar"
                                                        </Button>
                                                    </Flex>
                                                    </Show>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    }.into_any()
                }}
            </div>

            <ApprovalDialog open=dialog_open role=actor target=target on_done=on_done />
        </PageFrame>
    }
}
