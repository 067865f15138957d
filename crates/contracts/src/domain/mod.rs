pub mod a001_solicitud;
