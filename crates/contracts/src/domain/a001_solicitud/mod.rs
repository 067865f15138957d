pub mod aggregate;
pub mod approval;
pub mod catalog;
pub mod form;
pub mod status;

pub use aggregate::{
    DatosComercial, Documentos, EstadoSolicitud, Notas, ResumenSolicitudes, Solicitud,
    SolicitudId,
};
pub use approval::{ApprovalDraft, ApprovalError, ApprovalPayload, ApprovalResponse, Decision};
pub use catalog::{Marca, MetodoPago, Tarifa, TerminoPago, TipoCarga};
pub use form::{sepa_extension_ok, NuevaSolicitud, SolicitudFormError, SEPA_ACCEPT, SEPA_EXTENSIONS};
pub use status::{presentacion, EstadoColor, EstadoPresentacion};
