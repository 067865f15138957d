//! Approve/reject dialog for one request in the approver's queue.

use super::details::SolicitudDetails;
use crate::domain::a001_solicitud::api;
use crate::shared::components::estado_badge::EstadoBadge;
use crate::shared::components::status_message::ErrorMessage;
use contracts::domain::a001_solicitud::{
    ApprovalDraft, Decision, Marca, Solicitud, Tarifa, TerminoPago,
};
use contracts::system::roles::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Dialog form fields. Plain signals so thaw inputs can bind to them; the
/// draft is rebuilt from them on every read.
#[derive(Clone, Copy)]
struct DraftFields {
    notas: RwSignal<String>,
    marcas: [(Marca, RwSignal<bool>); 4],
    tarifa: RwSignal<String>,
    termino_pago: RwSignal<String>,
}

impl DraftFields {
    fn new() -> Self {
        Self {
            notas: RwSignal::new(String::new()),
            marcas: Marca::ALL.map(|m| (m, RwSignal::new(false))),
            tarifa: RwSignal::new(String::new()),
            termino_pago: RwSignal::new(String::new()),
        }
    }

    fn load(&self, draft: &ApprovalDraft) {
        self.notas.set(draft.notas.clone());
        for (marca, flag) in self.marcas.iter() {
            flag.set(draft.marcas.contains(marca));
        }
        self.tarifa
            .set(draft.tarifa.map(|t| t.code().to_string()).unwrap_or_default());
        self.termino_pago
            .set(draft.termino_pago.map(|t| t.code().to_string()).unwrap_or_default());
    }

    fn draft(&self, decision: Decision) -> ApprovalDraft {
        let mut draft = ApprovalDraft::new(decision);
        draft.notas = self.notas.get();
        for (marca, flag) in self.marcas.iter() {
            if flag.get() {
                draft.toggle_marca(*marca);
            }
        }
        draft.tarifa = Tarifa::from_code(&self.tarifa.get());
        draft.termino_pago = TerminoPago::from_code(&self.termino_pago.get());
        draft
    }
}

#[component]
pub fn ApprovalDialog(
    open: RwSignal<bool>,
    role: Role,
    /// Request and the decision picked in the table
    target: RwSignal<Option<(Solicitud, Decision)>>,
    /// Runs after the server accepted the decision
    on_done: Callback<()>,
) -> impl IntoView {
    let fields = DraftFields::new();
    let submitting = RwSignal::new(false);
    let server_error = RwSignal::new(None::<String>);

    // Reset the form whenever another request is picked.
    Effect::new(move |_| {
        if let Some((solicitud, decision)) = target.get() {
            fields.load(&ApprovalDraft::prefilled(decision, &solicitud));
            server_error.set(None);
        }
    });

    let decision = move || target.with(|t| t.as_ref().map(|(_, d)| *d));
    let is_approve = move || decision().map(|d| d.is_approve()).unwrap_or(false);

    let validation_error = Signal::derive(move || {
        target.with(|t| {
            t.as_ref().and_then(|(solicitud, decision)| {
                fields
                    .draft(*decision)
                    .compose(role, solicitud)
                    .err()
                    .map(|e| e.to_string())
            })
        })
    });

    // State the request lands in if the server accepts this decision.
    let next_estado = Signal::derive(move || {
        target.with(|t| {
            t.as_ref().and_then(|(solicitud, decision)| {
                let payload = fields.draft(*decision).compose(role, solicitud).ok()?;
                let mut preview = solicitud.clone();
                preview.apply(role, &payload).ok()?;
                Some(preview.estado)
            })
        })
    });

    let submit = move |_| {
        let Some((solicitud, decision)) = target.get_untracked() else {
            return;
        };
        let payload = match fields.draft(decision).compose(role, &solicitud) {
            Ok(p) => p,
            Err(e) => {
                server_error.set(Some(e.to_string()));
                return;
            }
        };
        submitting.set(true);
        server_error.set(None);
        spawn_local(async move {
            match api::aprobar(&solicitud.id, &payload).await {
                Ok(resp) => {
                    log::info!("Solicitud {} -> {}", resp.id, resp.estado);
                    open.set(false);
                    on_done.run(());
                }
                Err(e) => server_error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let title = move || {
        let cliente = target.with(|t| t.as_ref().map(|(s, _)| s.cliente().to_string()).unwrap_or_default());
        if is_approve() {
            format!("Aprobar solicitud: {}", cliente)
        } else {
            format!("Rechazar solicitud: {}", cliente)
        }
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{title}</DialogTitle>
                    <DialogContent>
                        {move || target.get().map(|(solicitud, _)| view! {
                            <SolicitudDetails solicitud=solicitud role=role />
                        })}

                        <Show when=move || is_approve() && role == Role::Director>
                            <div class="approval-form__group">
                                <Label>"Marcas aprobadas"</Label>
                                <Flex gap=FlexGap::Small>
                                    {fields.marcas.iter().map(|(marca, flag)| view! {
                                        <Checkbox checked=*flag label=marca.label() />
                                    }).collect_view()}
                                </Flex>
                            </div>
                            <div class="approval-form__group">
                                <Label>"Tarifa"</Label>
                                <Select value=fields.tarifa>
                                    <option value="">"Seleccione una tarifa"</option>
                                    {Tarifa::ALL.iter().map(|t| view! {
                                        <option value=t.code()>{t.code()}</option>
                                    }).collect_view()}
                                </Select>
                            </div>
                        </Show>

                        <Show when=move || is_approve() && role == Role::Admin>
                            <div class="approval-form__group">
                                <Label>"Término de pago"</Label>
                                <Select value=fields.termino_pago>
                                    <option value="">"Seleccione un término"</option>
                                    {TerminoPago::ALL.iter().map(|t| view! {
                                        <option value=t.code()>{t.label()}</option>
                                    }).collect_view()}
                                </Select>
                            </div>
                        </Show>

                        <div class="approval-form__group">
                            <Label>"Observaciones"</Label>
                            <Textarea value=fields.notas placeholder="Notas para el expediente" attr:rows=3 />
                        </div>

                        {move || next_estado.get().map(|estado| view! {
                            <p class="approval-form__next">"Nuevo estado: " <EstadoBadge estado=estado /></p>
                        })}

                        <ErrorMessage message=Signal::derive(move || server_error.get().or_else(|| validation_error.get())) />
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancelar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || submitting.get() || validation_error.get().is_some())
                        >
                            {move || match (submitting.get(), is_approve()) {
                                (true, _) => "Enviando...",
                                (false, true) => "Confirmar aprobación",
                                (false, false) => "Confirmar rechazo",
                            }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
