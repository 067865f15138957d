//! Read-only card with everything an approver needs to decide.

use crate::shared::api_utils::resource_url;
use crate::shared::components::estado_badge::EstadoBadge;
use crate::shared::format::{format_datetime, format_euros};
use contracts::domain::a001_solicitud::{Marca, Solicitud, Tarifa, TerminoPago};
use contracts::system::roles::Role;
use leptos::prelude::*;

fn field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-field">
            <span class="detail-field__label">{label}</span>
            <span class="detail-field__value">{if value.trim().is_empty() { "-".to_string() } else { value }}</span>
        </div>
    }
}

fn marcas_text(codes: &[String]) -> String {
    codes
        .iter()
        .map(|c| Marca::from_code(c).map(|m| m.label().to_string()).unwrap_or_else(|| c.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Earlier stages an approver at `role` gets to see.
fn previous_stages(role: Role) -> &'static [Role] {
    match role {
        Role::Pedidos => &[Role::Director],
        Role::Admin => &[Role::Director, Role::Pedidos],
        Role::Director | Role::Comercial => &[],
    }
}

#[component]
pub fn SolicitudDetails(solicitud: Solicitud, role: Role) -> impl IntoView {
    let d = solicitud.datos_comercial.clone();

    let envio = d
        .direccion_envio
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|dir| {
            format!(
                "{}, {} {}",
                dir,
                d.codigo_postal_envio.clone().unwrap_or_default(),
                d.poblacion_envio.clone().unwrap_or_default()
            )
        });

    let sepa = d.sepa_documento().map(resource_url);
    let requires_sepa = d.requires_sepa();

    let previas = previous_stages(role)
        .iter()
        .map(|stage| {
            let nota = solicitud.notas.get(*stage).map(str::to_string);
            let extra = match stage {
                Role::Director => {
                    let tarifa = d
                        .tarifa_aprobada
                        .as_deref()
                        .map(|t| Tarifa::from_code(t).map(|t| t.code().to_string()).unwrap_or_else(|| t.to_string()))
                        .unwrap_or_default();
                    Some(format!("Marcas: {} · Tarifa: {}", marcas_text(&d.marcas_aprobadas), tarifa))
                }
                _ => None,
            };
            view! {
                <div class="approval-history__item">
                    <strong>{stage.title()}</strong>
                    {extra.map(|e| view! { <div>{e}</div> })}
                    <div class="approval-history__note">
                        {nota.unwrap_or_else(|| "Sin observaciones".to_string())}
                    </div>
                </div>
            }
        })
        .collect_view();

    let termino = d
        .termino_pago
        .as_deref()
        .map(|t| TerminoPago::from_code(t).map(|t| t.label()).unwrap_or_else(|| t.to_string()));

    view! {
        <div class="solicitud-details">
            <div class="solicitud-details__header">
                <h3>{d.nombre.clone()}</h3>
                <EstadoBadge estado=solicitud.estado.clone() />
            </div>

            <div class="detail-grid">
                {field("CIF/NIF", d.cif_nif.clone())}
                {field("Autónomo", if d.es_autonomo { "Sí".into() } else { "No".into() })}
                {field("Dirección", format!("{}, {} {}", d.direccion, d.codigo_postal, d.poblacion))}
                {envio.map(|e| field("Dirección de envío", e))}
                {field("Contacto", d.nombre_contacto.clone())}
                {field("Teléfono", d.telefono.clone())}
                {field("Correo", d.correo.clone())}
                {field("Tipo de carga", d.tipo_carga.clone())}
                {field("Método de pago", d.metodo_pago.clone())}
                {field("Crédito solicitado", d.credito_solicitado().map(format_euros).unwrap_or_default())}
                {termino.map(|t| field("Término de pago", t))}
                {field("Fecha de creación", format_datetime(&solicitud.fecha_creacion))}
            </div>

            {match sepa {
                Some(url) => view! {
                    <a class="sepa-link" href=url target="_blank" rel="noopener">"Ver documento SEPA"</a>
                }.into_any(),
                None if requires_sepa => view! {
                    <div class="alert alert--warning">"Falta el documento SEPA requerido para este método de pago"</div>
                }.into_any(),
                None => view! { <></> }.into_any(),
            }}

            {(!previous_stages(role).is_empty()).then(|| view! {
                <div class="approval-history">
                    <h4>"Aprobaciones anteriores"</h4>
                    {previas}
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marcas_text_keeps_unknown_codes() {
        let codes = vec!["SV".to_string(), "XX".to_string()];
        assert_eq!(marcas_text(&codes), format!("{}, XX", Marca::Svan.label()));
    }

    #[test]
    fn test_previous_stages() {
        assert!(previous_stages(Role::Director).is_empty());
        assert_eq!(previous_stages(Role::Admin), &[Role::Director, Role::Pedidos]);
    }
}
