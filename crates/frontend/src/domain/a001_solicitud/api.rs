use contracts::domain::a001_solicitud::{
    form::SEPA_PART, ApprovalPayload, ApprovalResponse, NuevaSolicitud, ResumenSolicitudes,
    Solicitud, SolicitudId,
};
use contracts::system::roles::Role;
use web_sys::{File, FormData};

use crate::shared::http::{self, ApiError};

const BASE: &str = "/api/solicitudes";

fn pendientes_path(role: Role) -> String {
    format!("{}/pendientes/{}", BASE, role)
}

fn usuario_path(email: &str) -> String {
    format!("{}/usuario/{}", BASE, urlencoding::encode(email.trim()))
}

fn aprobar_path(id: &SolicitudId) -> String {
    format!("{}/{}/aprobar", BASE, id.as_string())
}

fn form_error(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Validation(format!("Failed to build form data: {:?}", e))
}

/// Queue of `role`. Anything the server sends outside the queue is dropped.
pub async fn fetch_pendientes(role: Role) -> Result<Vec<Solicitud>, ApiError> {
    let items: Vec<Solicitud> = http::get_json(&pendientes_path(role)).await?;
    let total = items.len();
    let visible: Vec<Solicitud> = Solicitud::pending_for(role, &items)
        .into_iter()
        .cloned()
        .collect();
    if visible.len() != total {
        log::warn!(
            "Pending list for {} contained {} foreign items",
            role,
            total - visible.len()
        );
    }
    Ok(visible)
}

/// Requests created by `email`.
pub async fn fetch_por_usuario(email: &str) -> Result<Vec<Solicitud>, ApiError> {
    http::get_json(&usuario_path(email)).await
}

pub async fn fetch_resumen() -> Result<ResumenSolicitudes, ApiError> {
    http::get_json(&format!("{}/resumen", BASE)).await
}

pub async fn aprobar(id: &SolicitudId, payload: &ApprovalPayload) -> Result<ApprovalResponse, ApiError> {
    log::info!(
        "Submitting {} for {}",
        if payload.aprobar { "approval" } else { "rejection" },
        id
    );
    http::put_json(&aprobar_path(id), payload).await
}

/// Creates a request in one multipart call; the SEPA mandate travels as the
/// `sepa` part when present.
pub async fn crear_solicitud(form: &NuevaSolicitud, sepa: Option<File>) -> Result<Solicitud, ApiError> {
    let data = FormData::new().map_err(form_error)?;
    for (name, value) in form.form_fields() {
        data.append_with_str(name, &value).map_err(form_error)?;
    }
    if let Some(file) = sepa {
        data.append_with_blob_and_filename(SEPA_PART, &file, &file.name())
            .map_err(form_error)?;
    }
    http::post_multipart(&format!("{}/", BASE), data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_paths() {
        assert_eq!(pendientes_path(Role::Director), "/api/solicitudes/pendientes/director");
        assert_eq!(
            usuario_path("ana.lopez+ventas@svan.es"),
            "/api/solicitudes/usuario/ana.lopez%2Bventas%40svan.es"
        );
        let id = SolicitudId::new(Uuid::nil());
        assert_eq!(
            aprobar_path(&id),
            "/api/solicitudes/00000000-0000-0000-0000-000000000000/aprobar"
        );
    }
}
