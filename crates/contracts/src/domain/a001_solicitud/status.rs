use super::aggregate::EstadoSolicitud;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoColor {
    Yellow,
    Blue,
    Purple,
    Green,
    Red,
    Gray,
}

impl EstadoColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            EstadoColor::Yellow => "badge badge--yellow",
            EstadoColor::Blue => "badge badge--blue",
            EstadoColor::Purple => "badge badge--purple",
            EstadoColor::Green => "badge badge--green",
            EstadoColor::Red => "badge badge--red",
            EstadoColor::Gray => "badge badge--neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstadoPresentacion {
    pub label: String,
    pub color: EstadoColor,
}

/// Label and badge color for a state. Unknown codes come back as-is in gray.
pub fn presentacion(estado: &EstadoSolicitud) -> EstadoPresentacion {
    let (label, color) = match estado {
        EstadoSolicitud::PendienteDirector => ("Pendiente Director", EstadoColor::Yellow),
        EstadoSolicitud::PendientePedidos => ("Pendiente Pedidos", EstadoColor::Blue),
        EstadoSolicitud::PendienteAdmin => ("Pendiente Admin", EstadoColor::Purple),
        EstadoSolicitud::Completado => ("Completado", EstadoColor::Green),
        EstadoSolicitud::Rechazado => ("Rechazado", EstadoColor::Red),
        EstadoSolicitud::Desconocido(raw) => (raw.as_str(), EstadoColor::Gray),
    };
    EstadoPresentacion {
        label: label.to_string(),
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_have_labels_and_colors() {
        let p = presentacion(&EstadoSolicitud::PendienteDirector);
        assert_eq!(p.label, "Pendiente Director");
        assert_eq!(p.color, EstadoColor::Yellow);
        assert_eq!(presentacion(&EstadoSolicitud::Rechazado).color, EstadoColor::Red);
        assert_eq!(presentacion(&EstadoSolicitud::Completado).label, "Completado");
    }

    #[test]
    fn unknown_states_fall_back_to_raw_gray() {
        for raw in ["archivado", "", "PENDIENTE_LOGISTICA", "ñ?"] {
            let p = presentacion(&EstadoSolicitud::parse(raw));
            assert_eq!(p.label, raw);
            assert_eq!(p.color, EstadoColor::Gray);
            assert_eq!(p.color.css_class(), "badge badge--neutral");
        }
    }
}
