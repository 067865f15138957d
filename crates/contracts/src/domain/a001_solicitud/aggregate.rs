use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::approval::{ApprovalError, ApprovalPayload};
use super::catalog::MetodoPago;
use crate::system::access;
use crate::system::roles::Role;

// ============================================================================
// ID Type
// ============================================================================

/// Request id, assigned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolicitudId(pub Uuid);

impl SolicitudId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for SolicitudId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Estado
// ============================================================================

/// Position of a request in the approval chain.
///
/// The server has sent both `pendiente_director` and `PENDIENTE_DIRECTOR`, so
/// parsing ignores case. Anything unrecognised is kept verbatim in
/// `Desconocido` instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EstadoSolicitud {
    PendienteDirector,
    PendientePedidos,
    PendienteAdmin,
    Completado,
    Rechazado,
    Desconocido(String),
}

impl EstadoSolicitud {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pendiente_director" => Self::PendienteDirector,
            "pendiente_pedidos" => Self::PendientePedidos,
            "pendiente_admin" => Self::PendienteAdmin,
            "completado" => Self::Completado,
            "rechazado" => Self::Rechazado,
            _ => Self::Desconocido(raw.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::PendienteDirector => "pendiente_director",
            Self::PendientePedidos => "pendiente_pedidos",
            Self::PendienteAdmin => "pendiente_admin",
            Self::Completado => "completado",
            Self::Rechazado => "rechazado",
            Self::Desconocido(raw) => raw,
        }
    }

    /// The pending state a role's queue is built from (`"pendiente_" + role`).
    pub fn pending_for(role: Role) -> Option<Self> {
        match role {
            Role::Director => Some(Self::PendienteDirector),
            Role::Pedidos => Some(Self::PendientePedidos),
            Role::Admin => Some(Self::PendienteAdmin),
            Role::Comercial => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completado | Self::Rechazado)
    }

    /// Next state after the holder approves. `None` outside the pending chain.
    pub fn next_on_approve(&self) -> Option<Self> {
        match self {
            Self::PendienteDirector => Some(Self::PendientePedidos),
            Self::PendientePedidos => Some(Self::PendienteAdmin),
            Self::PendienteAdmin => Some(Self::Completado),
            _ => None,
        }
    }
}

impl From<String> for EstadoSolicitud {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EstadoSolicitud> for String {
    fn from(value: EstadoSolicitud) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for EstadoSolicitud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Datos comerciales
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Documentos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sepa: Option<String>,
}

/// Client data captured by the sales rep plus the fields later stages add.
///
/// Codes are kept as strings: this is the wire record and must not reject a
/// request because the server knows a code the client does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatosComercial {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub poblacion: String,
    #[serde(default, rename = "codigoPostal")]
    pub codigo_postal: String,
    #[serde(default, rename = "direccionEnvio")]
    pub direccion_envio: Option<String>,
    #[serde(default, rename = "poblacionEnvio")]
    pub poblacion_envio: Option<String>,
    #[serde(default, rename = "codigoPostalEnvio")]
    pub codigo_postal_envio: Option<String>,
    #[serde(default, rename = "nombreContacto")]
    pub nombre_contacto: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub cif_nif: String,
    #[serde(default, rename = "tipoCarga", alias = "tipo_carga")]
    pub tipo_carga: String,
    #[serde(default, rename = "metodoPago", alias = "metodo_pago")]
    pub metodo_pago: String,
    #[serde(default, rename = "solicitudCredito")]
    pub solicitud_credito: Option<f64>,
    #[serde(default, rename = "esAutonomo")]
    pub es_autonomo: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documentos: Documentos,
    /// Older records carry the SEPA link here instead of `documentos.sepa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sepa_documento: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marcas_aprobadas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarifa_aprobada: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termino_pago: Option<String>,
}

impl DatosComercial {
    pub fn metodo_pago(&self) -> Option<MetodoPago> {
        MetodoPago::from_code(&self.metodo_pago)
    }

    pub fn requires_sepa(&self) -> bool {
        self.metodo_pago().map(|m| m.requires_sepa()).unwrap_or(false)
    }

    pub fn sepa_documento(&self) -> Option<&str> {
        self.documentos
            .sepa
            .as_deref()
            .or(self.sepa_documento.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn credito_solicitado(&self) -> Option<f64> {
        self.solicitud_credito.filter(|c| *c > 0.0)
    }
}

// ============================================================================
// Notas
// ============================================================================

/// Observations keyed by role; each role writes only its own entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notas(BTreeMap<String, String>);

impl Notas {
    pub fn get(&self, role: Role) -> Option<&str> {
        self.0
            .get(role.as_str())
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub(crate) fn write(&mut self, role: Role, text: &str) {
        self.0.insert(role.as_str().to_string(), text.to_string());
    }

    pub fn is_empty(&self) -> bool {
        Role::APPROVERS.iter().all(|r| self.get(*r).is_none())
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solicitud {
    pub id: SolicitudId,
    pub estado: EstadoSolicitud,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datos_comercial: DatosComercial,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notas: Notas,
    #[serde(default)]
    pub aprobado_director: bool,
    #[serde(default)]
    pub aprobado_pedidos: bool,
    #[serde(default)]
    pub aprobado_admin: bool,
    pub fecha_creacion: String,
    #[serde(default)]
    pub ultima_modificacion: Option<String>,
}

impl Solicitud {
    pub fn cliente(&self) -> &str {
        &self.datos_comercial.nombre
    }

    /// Applies a decision by `role` the same way the server advances the chain.
    ///
    /// Approve sets the stage flag, writes the stage fields and moves to the
    /// next state; reject moves to `rechazado`. Either way only `role`'s note
    /// is written. Nothing is mutated when validation fails.
    pub fn apply(&mut self, role: Role, payload: &ApprovalPayload) -> Result<(), ApprovalError> {
        payload.validate_for(role, self)?;

        if payload.aprobar {
            match role {
                Role::Director => {
                    self.datos_comercial.marcas_aprobadas = payload
                        .marcas
                        .iter()
                        .flatten()
                        .map(|m| m.code().to_string())
                        .collect();
                    self.datos_comercial.tarifa_aprobada =
                        payload.tarifa.map(|t| t.code().to_string());
                    self.aprobado_director = true;
                }
                Role::Pedidos => {
                    self.aprobado_pedidos = true;
                }
                Role::Admin => {
                    self.datos_comercial.termino_pago =
                        payload.termino_pago.map(|t| t.code().to_string());
                    self.aprobado_admin = true;
                }
                Role::Comercial => {
                    return Err(ApprovalError::NoPendiente {
                        role,
                        estado: self.estado.code().to_string(),
                    })
                }
            }
            if let Some(next) = self.estado.next_on_approve() {
                self.estado = next;
            }
        } else {
            self.estado = EstadoSolicitud::Rechazado;
        }

        self.notas.write(role, &payload.notas);
        Ok(())
    }

    /// Requests from `items` that sit in `role`'s pending queue.
    pub fn pending_for<'a>(
        role: Role,
        items: impl IntoIterator<Item = &'a Solicitud>,
    ) -> Vec<&'a Solicitud> {
        items
            .into_iter()
            .filter(|s| access::is_visible_to(role, &s.estado))
            .collect()
    }
}

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumenSolicitudes {
    #[serde(default)]
    pub pendientes: u64,
    #[serde(default)]
    pub completadas: u64,
    #[serde(default)]
    pub rechazadas: u64,
}

impl ResumenSolicitudes {
    pub fn total(&self) -> u64 {
        self.pendientes + self.completadas + self.rechazadas
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn fixture(estado: &str) -> Solicitud {
        serde_json::from_value(json!({
            "id": "7d1f6a50-2b7e-4c55-9a57-0c4f3c2d9e11",
            "estado": estado,
            "datos_comercial": {
                "nombre": "Electro Norte SL",
                "direccion": "C/ Mayor 1",
                "poblacion": "Bilbao",
                "codigoPostal": "48001",
                "nombreContacto": "Ana Ruiz",
                "telefono": "944000000",
                "correo": "ana@electronorte.es",
                "cif_nif": "B12345678",
                "tipoCarga": "COMP",
                "metodoPago": "TRANSFERENCIA",
                "solicitudCredito": 0.0,
                "esAutonomo": false,
                "documentos": {}
            },
            "notas": {},
            "aprobado_director": false,
            "aprobado_pedidos": false,
            "aprobado_admin": false,
            "fecha_creacion": "2024-03-15T14:02:26.123456+00:00",
            "ultima_modificacion": null
        }))
        .unwrap()
    }

    #[test]
    fn parses_estado_in_any_case() {
        assert_eq!(
            EstadoSolicitud::parse("PENDIENTE_DIRECTOR"),
            EstadoSolicitud::PendienteDirector
        );
        assert_eq!(EstadoSolicitud::parse("completado"), EstadoSolicitud::Completado);
        assert_eq!(
            EstadoSolicitud::parse("archivado"),
            EstadoSolicitud::Desconocido("archivado".into())
        );
        assert_eq!(EstadoSolicitud::parse("Archivado").code(), "Archivado");
    }

    #[test]
    fn chain_only_moves_forward() {
        let mut estado = EstadoSolicitud::PendienteDirector;
        let mut visited = vec![estado.clone()];
        while let Some(next) = estado.next_on_approve() {
            visited.push(next.clone());
            estado = next;
        }
        assert_eq!(
            visited,
            vec![
                EstadoSolicitud::PendienteDirector,
                EstadoSolicitud::PendientePedidos,
                EstadoSolicitud::PendienteAdmin,
                EstadoSolicitud::Completado,
            ]
        );
        assert!(EstadoSolicitud::Rechazado.next_on_approve().is_none());
        assert!(EstadoSolicitud::Completado.is_terminal());
    }

    #[test]
    fn pending_state_is_prefixed_role() {
        for role in Role::APPROVERS {
            let estado = EstadoSolicitud::pending_for(role).unwrap();
            assert_eq!(estado.code(), format!("pendiente_{}", role));
        }
        assert_eq!(EstadoSolicitud::pending_for(Role::Comercial), None);
    }

    #[test]
    fn deserializes_server_record() {
        let s = fixture("PENDIENTE_PEDIDOS");
        assert_eq!(s.estado, EstadoSolicitud::PendientePedidos);
        assert_eq!(s.cliente(), "Electro Norte SL");
        assert_eq!(s.datos_comercial.metodo_pago(), Some(MetodoPago::Transferencia));
        assert!(s.notas.is_empty());
        assert!(s.ultima_modificacion.is_none());
        // serialises back to the canonical lower-case code
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["estado"], "pendiente_pedidos");
    }

    #[test]
    fn tolerates_null_collections_and_legacy_keys() {
        let s: Solicitud = serde_json::from_value(json!({
            "id": "7d1f6a50-2b7e-4c55-9a57-0c4f3c2d9e11",
            "estado": "pendiente_director",
            "datos_comercial": {
                "nombre": "Frio Sur",
                "metodo_pago": "RECIBO B2B",
                "sepa_documento": "/uploads/documents/abc.pdf",
                "documentos": null
            },
            "notas": null,
            "fecha_creacion": "2024-03-15T14:02:26"
        }))
        .unwrap();
        assert!(s.datos_comercial.requires_sepa());
        assert_eq!(
            s.datos_comercial.sepa_documento(),
            Some("/uploads/documents/abc.pdf")
        );
        assert!(s.notas.is_empty());
    }

    #[test]
    fn credit_is_reported_only_when_positive() {
        let mut s = fixture("pendiente_director");
        assert_eq!(s.datos_comercial.credito_solicitado(), None);
        s.datos_comercial.solicitud_credito = Some(15000.0);
        assert_eq!(s.datos_comercial.credito_solicitado(), Some(15000.0));
    }

    #[test]
    fn pending_queue_filters_by_role() {
        let items = vec![
            fixture("pendiente_director"),
            fixture("pendiente_pedidos"),
            fixture("PENDIENTE_DIRECTOR"),
            fixture("completado"),
            fixture("rechazado"),
            fixture("otro"),
        ];
        let queue = Solicitud::pending_for(Role::Director, &items);
        assert_eq!(queue.len(), 2);
        assert!(queue
            .iter()
            .all(|s| s.estado.code() == "pendiente_director"));
        assert!(Solicitud::pending_for(Role::Comercial, &items).is_empty());
    }

    #[test]
    fn summary_total() {
        let r: ResumenSolicitudes =
            serde_json::from_value(json!({"pendientes": 3, "completadas": 5, "rechazadas": 1}))
                .unwrap();
        assert_eq!(r.total(), 9);
    }
}
