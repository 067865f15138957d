//! New-client request submitted by the sales role.

use thiserror::Error;

use super::catalog::{MetodoPago, TipoCarga};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolicitudFormError {
    #[error("Campos obligatorios sin completar: {}", .0.join(", "))]
    CamposRequeridos(Vec<&'static str>),
    #[error("Debe adjuntar el documento SEPA para el método de pago {0}")]
    SepaRequerido(&'static str),
    #[error("El documento SEPA debe ser PDF, DOC o DOCX: {0}")]
    SepaFormato(String),
}

/// Name of the multipart part carrying the SEPA mandate.
pub const SEPA_PART: &str = "sepa";

/// File types the API stores as SEPA mandates.
pub const SEPA_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// `accept` attribute for the SEPA file input.
pub const SEPA_ACCEPT: &str = ".pdf,.doc,.docx";

pub fn sepa_extension_ok(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| SEPA_EXTENSIONS.iter().any(|ok| ext.eq_ignore_ascii_case(ok)))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NuevaSolicitud {
    pub nombre: String,
    pub direccion: String,
    pub poblacion: String,
    pub codigo_postal: String,
    pub direccion_envio: String,
    pub poblacion_envio: String,
    pub codigo_postal_envio: String,
    pub nombre_contacto: String,
    pub telefono: String,
    pub correo: String,
    pub cif_nif: String,
    pub tipo_carga: Option<TipoCarga>,
    pub metodo_pago: Option<MetodoPago>,
    pub solicitud_credito: Option<f64>,
    pub es_autonomo: bool,
}

impl NuevaSolicitud {
    pub fn requires_sepa(&self) -> bool {
        self.metodo_pago.map(|m| m.requires_sepa()).unwrap_or(false)
    }

    /// Presence-only validation of the fields; formats are left to the server.
    /// `sepa` is the name of the attached mandate file, if any.
    pub fn validate(&self, sepa: Option<&str>) -> Result<(), SolicitudFormError> {
        let texts = [
            ("Nombre", &self.nombre),
            ("Dirección", &self.direccion),
            ("Población", &self.poblacion),
            ("Código Postal", &self.codigo_postal),
            ("Nombre Contacto", &self.nombre_contacto),
            ("Teléfono", &self.telefono),
            ("Correo", &self.correo),
            ("CIF/NIF", &self.cif_nif),
        ];
        let mut missing: Vec<&'static str> = texts
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| *label)
            .collect();
        if self.tipo_carga.is_none() {
            missing.push("Tipo de Carga");
        }
        if self.metodo_pago.is_none() {
            missing.push("Método de Pago");
        }
        if !missing.is_empty() {
            return Err(SolicitudFormError::CamposRequeridos(missing));
        }

        if let Some(metodo) = self.metodo_pago {
            if metodo.requires_sepa() {
                match sepa {
                    None => return Err(SolicitudFormError::SepaRequerido(metodo.code())),
                    Some(name) if !sepa_extension_ok(name) => {
                        return Err(SolicitudFormError::SepaFormato(name.to_string()))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Text parts of the multipart body, in the names the API expects.
    /// Empty optional shipping fields are omitted.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("nombre", self.nombre.trim().to_string()),
            ("direccion", self.direccion.trim().to_string()),
            ("poblacion", self.poblacion.trim().to_string()),
            ("codigoPostal", self.codigo_postal.trim().to_string()),
        ];
        for (name, value) in [
            ("direccionEnvio", &self.direccion_envio),
            ("poblacionEnvio", &self.poblacion_envio),
            ("codigoPostalEnvio", &self.codigo_postal_envio),
        ] {
            if !value.trim().is_empty() {
                fields.push((name, value.trim().to_string()));
            }
        }
        fields.extend([
            ("nombreContacto", self.nombre_contacto.trim().to_string()),
            ("telefono", self.telefono.trim().to_string()),
            ("correo", self.correo.trim().to_string()),
            ("cif_nif", self.cif_nif.trim().to_string()),
            (
                "tipoCarga",
                self.tipo_carga.map(|t| t.code().to_string()).unwrap_or_default(),
            ),
            (
                "metodoPago",
                self.metodo_pago.map(|m| m.code().to_string()).unwrap_or_default(),
            ),
            ("solicitudCredito", self.solicitud_credito.unwrap_or(0.0).to_string()),
            ("esAutonomo", self.es_autonomo.to_string()),
        ]);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_solicitud::aggregate::Solicitud;
    use serde_json::json;

    fn complete() -> NuevaSolicitud {
        NuevaSolicitud {
            nombre: "Electro Norte SL".into(),
            direccion: "C/ Mayor 1".into(),
            poblacion: "Bilbao".into(),
            codigo_postal: "48001".into(),
            nombre_contacto: "Ana Ruiz".into(),
            telefono: "944000000".into(),
            correo: "ana@electronorte.es".into(),
            cif_nif: "B12345678".into(),
            tipo_carga: Some(TipoCarga::Completa),
            metodo_pago: Some(MetodoPago::Transferencia),
            ..Default::default()
        }
    }

    #[test]
    fn lists_every_missing_field() {
        let err = NuevaSolicitud::default().validate(None).unwrap_err();
        match err {
            SolicitudFormError::CamposRequeridos(fields) => {
                assert_eq!(fields.len(), 10);
                assert!(fields.contains(&"CIF/NIF"));
                assert!(fields.contains(&"Método de Pago"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn whitespace_counts_as_missing_but_format_is_not_checked() {
        let mut s = complete();
        s.telefono = "   ".into();
        assert_eq!(
            s.validate(None),
            Err(SolicitudFormError::CamposRequeridos(vec!["Teléfono"]))
        );

        let mut s = complete();
        s.correo = "not-an-email".into();
        s.cif_nif = "x".into();
        assert!(s.validate(None).is_ok());
    }

    #[test]
    fn direct_debit_requires_attached_mandate() {
        let mut s = complete();
        s.metodo_pago = Some(MetodoPago::ReciboB2b);
        assert_eq!(
            s.validate(None),
            Err(SolicitudFormError::SepaRequerido("RECIBO B2B"))
        );
        assert!(s.validate(Some("mandato.pdf")).is_ok());
        assert!(s.requires_sepa());
    }

    #[test]
    fn mandate_must_be_pdf_or_word() {
        let mut s = complete();
        s.metodo_pago = Some(MetodoPago::Recibo);
        for ok in ["mandato.pdf", "MANDATO.PDF", "firma.doc", "firma.final.docx"] {
            assert!(s.validate(Some(ok)).is_ok(), "{ok}");
        }
        for bad in ["foto.jpg", "scan.png", "mandato", "mandato.pdf.exe"] {
            assert_eq!(
                s.validate(Some(bad)),
                Err(SolicitudFormError::SepaFormato(bad.to_string()))
            );
        }

        // no mandate is sent for other payment methods, so its name is irrelevant
        s.metodo_pago = Some(MetodoPago::Transferencia);
        assert!(s.validate(Some("foto.jpg")).is_ok());
    }

    #[test]
    fn form_fields_use_api_names() {
        let mut s = complete();
        s.solicitud_credito = Some(2500.5);
        s.es_autonomo = true;
        s.poblacion_envio = "Getxo".into();
        let fields = s.form_fields();
        let get = |k: &str| fields.iter().find(|(n, _)| *n == k).map(|(_, v)| v.as_str());
        assert_eq!(get("codigoPostal"), Some("48001"));
        assert_eq!(get("tipoCarga"), Some("COMP"));
        assert_eq!(get("metodoPago"), Some("TRANSFERENCIA"));
        assert_eq!(get("solicitudCredito"), Some("2500.5"));
        assert_eq!(get("esAutonomo"), Some("true"));
        assert_eq!(get("poblacionEnvio"), Some("Getxo"));
        assert_eq!(get("direccionEnvio"), None);
    }

    #[test]
    fn sepa_reference_survives_the_round_trip() {
        let mut s = complete();
        s.metodo_pago = Some(MetodoPago::Recibo);
        assert!(s.validate(Some("mandato.pdf")).is_ok());

        // what the server stores for the multipart `sepa` part and returns on fetch
        let uploaded = "/uploads/documents/3f2b.pdf";
        let mut datos = serde_json::Map::new();
        for (name, value) in s.form_fields() {
            datos.insert(name.to_string(), json!(value));
        }
        datos.insert("solicitudCredito".into(), json!(0.0));
        datos.insert("esAutonomo".into(), json!(false));
        datos.insert("documentos".into(), json!({ "sepa": uploaded }));

        let fetched: Solicitud = serde_json::from_value(json!({
            "id": "0b8a4c1e-9f7d-4b0e-8d77-2f1c6e5a4b3c",
            "estado": "PENDIENTE_DIRECTOR",
            "datos_comercial": datos,
            "notas": {},
            "aprobado_director": false,
            "aprobado_pedidos": false,
            "aprobado_admin": false,
            "fecha_creacion": "2024-05-02T09:00:00+00:00",
            "ultima_modificacion": null
        }))
        .unwrap();

        assert_eq!(fetched.datos_comercial.sepa_documento(), Some(uploaded));
        assert!(fetched.datos_comercial.requires_sepa());
        assert_eq!(fetched.datos_comercial.nombre, "Electro Norte SL");
    }
}
