use crate::domain::a001_solicitud::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::status_message::ErrorMessage;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DASHBOARD};
use crate::system::auth::context::use_auth;
use contracts::domain::a001_solicitud::ResumenSolicitudes;
use contracts::system::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Summary counters plus, for approvers, the size of their own queue.
#[component]
pub fn ResumenDashboard() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let resumen = RwSignal::new(None::<ResumenSolicitudes>);
    let mi_cola = RwSignal::new(None::<usize>);
    let error = RwSignal::new(None::<String>);

    let role = auth_state.with_untracked(|s| s.role());

    spawn_local(async move {
        match api::fetch_resumen().await {
            Ok(r) => resumen.set(Some(r)),
            Err(e) => {
                log::error!("Failed to load resumen: {}", e);
                error.set(Some(e.to_string()));
            }
        }
    });

    if let Some(role) = role.filter(|r| r.is_approver()) {
        spawn_local(async move {
            match api::fetch_pendientes(role).await {
                Ok(list) => mi_cola.set(Some(list.len())),
                Err(e) => log::warn!("Failed to load queue for {}: {}", role, e),
            }
        });
    }

    let count = move |f: fn(&ResumenSolicitudes) -> u64| {
        Signal::derive(move || resumen.get().map(|r| f(&r) as usize))
    };

    let greeting = auth_state.with_untracked(|s| {
        s.user()
            .map(|u| format!("{} · {}", u.display_name(), u.role.title()))
            .unwrap_or_default()
    });

    view! {
        <PageFrame page_id="d001_resumen--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Dashboard" subtitle=greeting />

            <div class="page__content">
                <ErrorMessage message=error />

                <div class="stat-grid">
                    <StatCard label="Pendientes" icon_name="inbox" value=count(|r| r.pendientes) variant="warning" />
                    <StatCard label="Completadas" icon_name="check" value=count(|r| r.completadas) variant="success" />
                    <StatCard label="Rechazadas" icon_name="x" value=count(|r| r.rechazadas) variant="error" />
                    <StatCard label="Total" icon_name="list" value=count(|r| r.total()) />
                </div>

                {role.filter(|r| r.is_approver()).map(|role| view! {
                    <div class="dashboard__queue">
                        <StatCard label="En mi bandeja" icon_name="inbox" value=mi_cola variant="primary" />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| ctx.navigate(AppRoute::Pendientes(role))
                        >
                            "Revisar pendientes"
                        </Button>
                    </div>
                })}
            </div>
        </PageFrame>
    }
}
