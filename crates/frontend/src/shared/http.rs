//! Thin HTTP layer over `gloo-net` shared by every API module.
//!
//! Each call is fire-and-wait: no retries, no timeout, no dedup. A 401 on an
//! authenticated call ends the session (see `system::auth::expiry`).

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::FormData;

use super::api_utils::api_url;
use crate::system::auth::{expiry, storage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("No se pudo conectar con el servidor: {0}")]
    Network(String),
    #[error("Sesión expirada. Inicie sesión de nuevo.")]
    Unauthorized,
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Respuesta inesperada del servidor: {0}")]
    Decode(String),
    #[error("{0}")]
    Validation(String),
}

/// Message for a failed response: the API's `detail` when present, otherwise
/// a generic text for the status.
pub fn error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());

    match detail {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        // FastAPI validation errors: [{"loc": [...], "msg": "...", ...}]
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                generic_message(status)
            } else {
                msgs.join("; ")
            }
        }
        _ => generic_message(status),
    }
}

fn generic_message(status: u16) -> String {
    match status {
        400 => "Solicitud no válida".to_string(),
        403 => "No tiene permisos para esta operación".to_string(),
        404 => "Recurso no encontrado".to_string(),
        422 => "Datos no válidos".to_string(),
        500..=599 => "Error interno del servidor".to_string(),
        _ => format!("Error HTTP {}", status),
    }
}

fn with_bearer(builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
    let token = storage::get_access_token().ok_or(ApiError::Unauthorized)?;
    Ok(builder.header("Authorization", &format!("Bearer {}", token)))
}

async fn send(request: Request, authenticated: bool) -> Result<Response, ApiError> {
    let url = request.url();
    let response = request.send().await.map_err(|e| {
        log::warn!("Request to {} failed: {}", url, e);
        ApiError::Network(e.to_string())
    })?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    if status == 401 && authenticated {
        expiry::session_expired();
        return Err(ApiError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    log::warn!("{} -> HTTP {}: {}", url, status, message);
    Err(ApiError::Http { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn build(builder: RequestBuilder) -> Result<Request, ApiError> {
    builder
        .build()
        .map_err(|e| ApiError::Validation(format!("Failed to build request: {}", e)))
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
    builder
        .json(body)
        .map_err(|e| ApiError::Validation(format!("Failed to serialize request: {}", e)))
}

/// Authenticated GET returning JSON.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let request = build(with_bearer(Request::get(&api_url(path)))?)?;
    decode(send(request, true).await?).await
}

/// Authenticated POST with a JSON body.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = with_json(with_bearer(Request::post(&api_url(path)))?, body)?;
    decode(send(request, true).await?).await
}

/// Authenticated PUT with a JSON body.
pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let request = with_json(with_bearer(Request::put(&api_url(path)))?, body)?;
    decode(send(request, true).await?).await
}

/// Authenticated POST whose response body is not needed.
pub async fn post_json_no_content<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    let request = with_json(with_bearer(Request::post(&api_url(path)))?, body)?;
    send(request, true).await.map(|_| ())
}

/// Authenticated DELETE.
pub async fn delete(path: &str) -> Result<(), ApiError> {
    let request = build(with_bearer(Request::delete(&api_url(path)))?)?;
    send(request, true).await.map(|_| ())
}

/// Authenticated multipart POST. The browser sets the boundary header.
pub async fn post_multipart<T: DeserializeOwned>(path: &str, form: FormData) -> Result<T, ApiError> {
    let request = with_bearer(Request::post(&api_url(path)))?
        .body(form)
        .map_err(|e| ApiError::Validation(format!("Failed to attach form data: {}", e)))?;
    decode(send(request, true).await?).await
}

/// Unauthenticated form-encoded POST (login). A 401 here is a wrong password,
/// not an expired session.
pub async fn post_urlencoded<T: DeserializeOwned>(path: &str, encoded: String) -> Result<T, ApiError> {
    let request = Request::post(&api_url(path))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(encoded)
        .map_err(|e| ApiError::Validation(format!("Failed to build request: {}", e)))?;
    decode(send(request, false).await?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_used() {
        assert_eq!(
            error_message(400, r#"{"detail":"Esta solicitud no está pendiente para el rol director"}"#),
            "Esta solicitud no está pendiente para el rol director"
        );
    }

    #[test]
    fn test_validation_detail_list_is_joined() {
        let body = r#"{"detail":[{"loc":["body","correo"],"msg":"value is not a valid email address"},{"loc":["body"],"msg":"field required"}]}"#;
        assert_eq!(
            error_message(422, body),
            "value is not a valid email address; field required"
        );
    }

    #[test]
    fn test_generic_message_without_detail() {
        assert_eq!(error_message(500, "<html>oops</html>"), "Error interno del servidor");
        assert_eq!(error_message(404, r#"{"detail":""}"#), "Recurso no encontrado");
        assert_eq!(error_message(418, ""), "Error HTTP 418");
    }

    #[test]
    fn test_api_error_display() {
        let e = ApiError::Http {
            status: 403,
            message: "No tienes permiso para crear usuarios".into(),
        };
        assert_eq!(e.to_string(), "No tienes permiso para crear usuarios");
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Sesión expirada. Inicie sesión de nuevo."
        );
    }
}
