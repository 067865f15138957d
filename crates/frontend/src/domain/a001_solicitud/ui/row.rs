use crate::shared::format::format_datetime;
use crate::shared::list_utils::{contains_ci, Searchable, Sortable};
use contracts::domain::a001_solicitud::{EstadoSolicitud, Solicitud};
use std::cmp::Ordering;

/// Flattened request for table display.
#[derive(Clone, Debug, PartialEq)]
pub struct SolicitudRow {
    pub id: String,
    pub cliente: String,
    pub cif_nif: String,
    pub poblacion: String,
    pub metodo_pago: String,
    pub credito: Option<f64>,
    pub estado: EstadoSolicitud,
    /// Raw ISO value, sorts chronologically
    pub fecha_creacion: String,
    pub fecha_display: String,
    pub aprobaciones: [bool; 3],
}

impl From<&Solicitud> for SolicitudRow {
    fn from(s: &Solicitud) -> Self {
        let d = &s.datos_comercial;
        Self {
            id: s.id.as_string(),
            cliente: s.cliente().to_string(),
            cif_nif: d.cif_nif.clone(),
            poblacion: d.poblacion.clone(),
            metodo_pago: d.metodo_pago.clone(),
            credito: d.credito_solicitado(),
            estado: s.estado.clone(),
            fecha_creacion: s.fecha_creacion.clone(),
            fecha_display: format_datetime(&s.fecha_creacion),
            aprobaciones: [s.aprobado_director, s.aprobado_pedidos, s.aprobado_admin],
        }
    }
}

impl Sortable for SolicitudRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "cliente" => self.cliente.to_lowercase().cmp(&other.cliente.to_lowercase()),
            "poblacion" => self.poblacion.to_lowercase().cmp(&other.poblacion.to_lowercase()),
            "metodo_pago" => self.metodo_pago.cmp(&other.metodo_pago),
            "credito" => self
                .credito
                .unwrap_or(0.0)
                .partial_cmp(&other.credito.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal),
            "estado" => self.estado.code().cmp(other.estado.code()),
            _ => self.fecha_creacion.cmp(&other.fecha_creacion),
        }
    }
}

impl Searchable for SolicitudRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.cliente, filter)
            || contains_ci(&self.cif_nif, filter)
            || contains_ci(&self.poblacion, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{filter_list, sort_list};
    use serde_json::json;

    fn solicitud(nombre: &str, fecha: &str, credito: f64) -> Solicitud {
        serde_json::from_value(json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "estado": "pendiente_director",
            "datos_comercial": {
                "nombre": nombre,
                "poblacion": "Bilbao",
                "cif_nif": "B12345678",
                "metodoPago": "TRANSFERENCIA",
                "solicitudCredito": credito
            },
            "fecha_creacion": fecha
        }))
        .unwrap()
    }

    #[test]
    fn test_row_from_solicitud() {
        let s = solicitud("Electro Norte SL", "2024-03-15T14:02:26", 0.0);
        let row = SolicitudRow::from(&s);
        assert_eq!(row.cliente, "Electro Norte SL");
        assert_eq!(row.fecha_display, "15/03/2024 14:02");
        assert_eq!(row.credito, None);
        assert_eq!(row.aprobaciones, [false, false, false]);
    }

    #[test]
    fn test_sort_and_search_rows() {
        let items = [
            solicitud("Zeta Hogar", "2024-01-02T10:00:00", 3000.0),
            solicitud("alfa electro", "2024-03-01T10:00:00", 500.0),
        ];
        let mut rows: Vec<SolicitudRow> = items.iter().map(SolicitudRow::from).collect();

        sort_list(&mut rows, "cliente", true);
        assert_eq!(rows[0].cliente, "alfa electro");

        sort_list(&mut rows, "fecha_creacion", false);
        assert_eq!(rows[0].cliente, "alfa electro");

        sort_list(&mut rows, "credito", false);
        assert_eq!(rows[0].cliente, "Zeta Hogar");

        assert_eq!(filter_list(&rows, "b1234").len(), 2);
        assert_eq!(filter_list(&rows, "zeta").len(), 1);
    }
}
