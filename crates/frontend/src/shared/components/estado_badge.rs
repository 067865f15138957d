use contracts::domain::a001_solicitud::{presentacion, EstadoSolicitud};
use leptos::prelude::*;

/// Badge for a request state. Unknown states render their raw code in gray.
#[component]
pub fn EstadoBadge(estado: EstadoSolicitud) -> impl IntoView {
    let p = presentacion(&estado);
    let code = estado.code().to_string();
    view! {
        <span class=p.color.css_class() title=code>
            {p.label}
        </span>
    }
}
