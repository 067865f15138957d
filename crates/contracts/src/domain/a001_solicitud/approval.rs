//! Composition and local validation of the approve/reject body.
//!
//! The checks here only gate the submit button; the server repeats them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::aggregate::{EstadoSolicitud, Solicitud, SolicitudId};
use super::catalog::{Marca, Tarifa, TerminoPago};
use crate::system::access;
use crate::system::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    #[error("Debe seleccionar al menos una marca")]
    MarcasRequeridas,
    #[error("Debe seleccionar una tarifa")]
    TarifaRequerida,
    #[error("Debe seleccionar un término de pago")]
    TerminoPagoRequerido,
    #[error("La solicitud necesita un documento SEPA antes de la aprobación del director")]
    SepaRequerido,
    #[error("La solicitud ya está cerrada ({0})")]
    Cerrada(String),
    #[error("Esta solicitud no está pendiente para el rol {role} (estado: {estado})")]
    NoPendiente { role: Role, estado: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Aprobar,
    Rechazar,
}

impl Decision {
    pub fn is_approve(&self) -> bool {
        matches!(self, Decision::Aprobar)
    }
}

/// Body of `PUT /api/solicitudes/{id}/aprobar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalPayload {
    pub aprobar: bool,
    #[serde(default)]
    pub notas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marcas: Option<Vec<Marca>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarifa: Option<Tarifa>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termino_pago: Option<TerminoPago>,
}

impl ApprovalPayload {
    /// Checks the payload against the acting role and the request it targets.
    pub fn validate_for(&self, role: Role, solicitud: &Solicitud) -> Result<(), ApprovalError> {
        if solicitud.estado.is_terminal() {
            return Err(ApprovalError::Cerrada(solicitud.estado.code().to_string()));
        }
        if !access::can_act(role, &solicitud.estado) {
            return Err(ApprovalError::NoPendiente {
                role,
                estado: solicitud.estado.code().to_string(),
            });
        }
        if !self.aprobar {
            return Ok(());
        }

        match role {
            Role::Director => {
                if self.marcas.as_ref().map_or(true, Vec::is_empty) {
                    return Err(ApprovalError::MarcasRequeridas);
                }
                if self.tarifa.is_none() {
                    return Err(ApprovalError::TarifaRequerida);
                }
                let datos = &solicitud.datos_comercial;
                if datos.requires_sepa() && datos.sepa_documento().is_none() {
                    return Err(ApprovalError::SepaRequerido);
                }
            }
            Role::Admin => {
                if self.termino_pago.is_none() {
                    return Err(ApprovalError::TerminoPagoRequerido);
                }
            }
            Role::Pedidos | Role::Comercial => {}
        }
        Ok(())
    }
}

/// Form state behind the approval dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalDraft {
    pub decision: Decision,
    pub notas: String,
    pub marcas: BTreeSet<Marca>,
    pub tarifa: Option<Tarifa>,
    pub termino_pago: Option<TerminoPago>,
}

impl ApprovalDraft {
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            notas: String::new(),
            marcas: BTreeSet::new(),
            tarifa: None,
            termino_pago: None,
        }
    }

    /// Starts from whatever earlier stages already stored on the request.
    pub fn prefilled(decision: Decision, solicitud: &Solicitud) -> Self {
        let datos = &solicitud.datos_comercial;
        Self {
            marcas: datos
                .marcas_aprobadas
                .iter()
                .filter_map(|code| Marca::from_code(code))
                .collect(),
            tarifa: datos.tarifa_aprobada.as_deref().and_then(Tarifa::from_code),
            termino_pago: datos.termino_pago.as_deref().and_then(TerminoPago::from_code),
            ..Self::new(decision)
        }
    }

    pub fn toggle_marca(&mut self, marca: Marca) {
        if !self.marcas.remove(&marca) {
            self.marcas.insert(marca);
        }
    }

    /// Builds the body for `role`. Role-specific fields are attached only on
    /// approve and only for the role that owns them.
    pub fn compose(&self, role: Role, solicitud: &Solicitud) -> Result<ApprovalPayload, ApprovalError> {
        let aprobar = self.decision.is_approve();
        let mut payload = ApprovalPayload {
            aprobar,
            notas: self.notas.trim().to_string(),
            marcas: None,
            tarifa: None,
            termino_pago: None,
        };

        if aprobar {
            match role {
                Role::Director => {
                    payload.marcas = Some(self.marcas.iter().copied().collect());
                    payload.tarifa = self.tarifa;
                }
                Role::Admin => {
                    payload.termino_pago = self.termino_pago;
                }
                Role::Pedidos | Role::Comercial => {}
            }
        }

        payload.validate_for(role, solicitud)?;
        Ok(payload)
    }

}

/// Server acknowledgement of an approve/reject call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalResponse {
    pub id: SolicitudId,
    pub estado: EstadoSolicitud,
    #[serde(default)]
    pub mensaje: String,
}
