//! New-client request form for the sales role.

use crate::domain::a001_solicitud::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::status_message::ErrorMessage;
use crate::shared::page_frame::{PageFrame, PageHeader, PAGE_CAT_DETAIL};
use contracts::domain::a001_solicitud::{MetodoPago, NuevaSolicitud, TipoCarga, SEPA_ACCEPT};
use contracts::system::routes::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

const CREDITO_FORMATO: &str = "Crédito solicitado no válido (ejemplos: 15000, 15.000, 1.500,50)";

/// Spanish notation only: `.` groups thousands, `,` marks decimals.
/// Blank or zero means no credit requested.
fn parse_credito(raw: &str) -> Result<Option<f64>, &'static str> {
    let raw = raw.trim().replace(' ', "");
    if raw.is_empty() {
        return Ok(None);
    }
    let (entero, decimales) = match raw.split_once(',') {
        Some((e, d)) => (e, Some(d)),
        None => (raw.as_str(), None),
    };
    let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

    let mut grupos = entero.split('.');
    let primero = grupos.next().unwrap_or_default();
    let agrupado_ok = digits(primero)
        && (!entero.contains('.') || primero.len() <= 3)
        && grupos.all(|g| g.len() == 3 && digits(g));
    if !agrupado_ok || decimales.is_some_and(|d| !digits(d)) {
        return Err(CREDITO_FORMATO);
    }

    let normalized = match decimales {
        Some(d) => format!("{}.{}", entero.replace('.', ""), d),
        None => entero.replace('.', ""),
    };
    let value = normalized.parse::<f64>().map_err(|_| CREDITO_FORMATO)?;
    Ok(Some(value).filter(|v| *v > 0.0))
}

#[derive(Clone, Copy)]
struct FormFields {
    nombre: RwSignal<String>,
    direccion: RwSignal<String>,
    poblacion: RwSignal<String>,
    codigo_postal: RwSignal<String>,
    envio_distinto: RwSignal<bool>,
    direccion_envio: RwSignal<String>,
    poblacion_envio: RwSignal<String>,
    codigo_postal_envio: RwSignal<String>,
    nombre_contacto: RwSignal<String>,
    telefono: RwSignal<String>,
    correo: RwSignal<String>,
    cif_nif: RwSignal<String>,
    tipo_carga: RwSignal<String>,
    metodo_pago: RwSignal<String>,
    credito: RwSignal<String>,
    es_autonomo: RwSignal<bool>,
}

impl FormFields {
    fn new() -> Self {
        let s = || RwSignal::new(String::new());
        Self {
            nombre: s(),
            direccion: s(),
            poblacion: s(),
            codigo_postal: s(),
            envio_distinto: RwSignal::new(false),
            direccion_envio: s(),
            poblacion_envio: s(),
            codigo_postal_envio: s(),
            nombre_contacto: s(),
            telefono: s(),
            correo: s(),
            cif_nif: s(),
            tipo_carga: s(),
            metodo_pago: s(),
            credito: s(),
            es_autonomo: RwSignal::new(false),
        }
    }

    fn value(&self) -> NuevaSolicitud {
        let envio = self.envio_distinto.get_untracked();
        let shipping = |sig: RwSignal<String>| if envio { sig.get_untracked() } else { String::new() };
        NuevaSolicitud {
            nombre: self.nombre.get_untracked(),
            direccion: self.direccion.get_untracked(),
            poblacion: self.poblacion.get_untracked(),
            codigo_postal: self.codigo_postal.get_untracked(),
            direccion_envio: shipping(self.direccion_envio),
            poblacion_envio: shipping(self.poblacion_envio),
            codigo_postal_envio: shipping(self.codigo_postal_envio),
            nombre_contacto: self.nombre_contacto.get_untracked(),
            telefono: self.telefono.get_untracked(),
            correo: self.correo.get_untracked(),
            cif_nif: self.cif_nif.get_untracked(),
            tipo_carga: TipoCarga::from_code(&self.tipo_carga.get_untracked()),
            metodo_pago: MetodoPago::from_code(&self.metodo_pago.get_untracked()),
            solicitud_credito: parse_credito(&self.credito.get_untracked()).ok().flatten(),
            es_autonomo: self.es_autonomo.get_untracked(),
        }
    }
}

#[component]
fn TextField(label: &'static str, value: RwSignal<String>, #[prop(optional)] input_type: Option<InputType>) -> impl IntoView {
    view! {
        <div class="form__group">
            <Label>{label}</Label>
            <Input value=value input_type=input_type.unwrap_or(InputType::Text) />
        </div>
    }
}

#[component]
pub fn NuevoClienteForm() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let f = FormFields::new();

    let sepa_file = StoredValue::new_local(None::<File>);
    let sepa_name = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let requires_sepa = move || {
        MetodoPago::from_code(&f.metodo_pago.get())
            .map(|m| m.requires_sepa())
            .unwrap_or(false)
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        sepa_name.set(file.as_ref().map(|f| f.name()));
        sepa_file.set_value(file);
    };

    let submit = move |_| {
        if let Err(e) = parse_credito(&f.credito.get_untracked()) {
            error.set(Some(e.to_string()));
            return;
        }
        let form = f.value();
        let sepa_nombre = sepa_name.get_untracked();
        if let Err(e) = form.validate(sepa_nombre.as_deref()) {
            error.set(Some(e.to_string()));
            return;
        }
        let file = if form.requires_sepa() {
            sepa_file.get_value()
        } else {
            None
        };

        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            match api::crear_solicitud(&form, file).await {
                Ok(created) => {
                    log::info!("Solicitud {} created for {}", created.id, created.cliente());
                    ctx.navigate(AppRoute::MisSolicitudes);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    view! {
        <PageFrame page_id="a001_solicitud--create" category=PAGE_CAT_DETAIL>
            <PageHeader title="Nueva Solicitud" subtitle="Alta de cliente" />

            <div class="page__content form">
                <fieldset class="form__section">
                    <legend>"Datos del cliente"</legend>
                    <TextField label="Nombre / Razón social *" value=f.nombre />
                    <TextField label="CIF/NIF *" value=f.cif_nif />
                    <Checkbox checked=f.es_autonomo label="Es autónomo" />
                    <TextField label="Dirección *" value=f.direccion />
                    <TextField label="Población *" value=f.poblacion />
                    <TextField label="Código Postal *" value=f.codigo_postal />
                    <Checkbox checked=f.envio_distinto label="Dirección de envío distinta" />
                    <Show when=move || f.envio_distinto.get()>
                        <TextField label="Dirección de envío" value=f.direccion_envio />
                        <TextField label="Población de envío" value=f.poblacion_envio />
                        <TextField label="Código Postal de envío" value=f.codigo_postal_envio />
                    </Show>
                </fieldset>

                <fieldset class="form__section">
                    <legend>"Contacto"</legend>
                    <TextField label="Nombre de contacto *" value=f.nombre_contacto />
                    <TextField label="Teléfono *" value=f.telefono input_type=InputType::Tel />
                    <TextField label="Correo *" value=f.correo input_type=InputType::Email />
                </fieldset>

                <fieldset class="form__section">
                    <legend>"Condiciones"</legend>
                    <div class="form__group">
                        <Label>"Tipo de carga *"</Label>
                        <Select value=f.tipo_carga>
                            <option value="">"Seleccione..."</option>
                            {TipoCarga::ALL.iter().map(|t| view! {
                                <option value=t.code()>{t.code()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <Label>"Método de pago *"</Label>
                        <Select value=f.metodo_pago>
                            <option value="">"Seleccione..."</option>
                            {MetodoPago::ALL.iter().map(|m| view! {
                                <option value=m.code()>{m.code()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <Show when=requires_sepa>
                        <div class="form__group">
                            <Label>"Documento SEPA *"</Label>
                            <input type="file" accept=SEPA_ACCEPT on:change=on_file_change />
                            {move || sepa_name.get().map(|n| view! { <span class="form__hint">{n}</span> })}
                        </div>
                    </Show>
                    <TextField label="Crédito solicitado (€, p. ej. 15.000 o 1.500,50)" value=f.credito />
                </fieldset>

                <ErrorMessage message=error />

                <div class="form__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctx.navigate(AppRoute::MisSolicitudes)
                    >
                        "Cancelar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=Signal::derive(move || submitting.get())
                    >
                        {move || if submitting.get() { "Enviando..." } else { "Enviar solicitud" }}
                    </Button>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credito() {
        assert_eq!(parse_credito(""), Ok(None));
        assert_eq!(parse_credito("15000"), Ok(Some(15000.0)));
        assert_eq!(parse_credito("15.000"), Ok(Some(15000.0)));
        assert_eq!(parse_credito("1.500.000"), Ok(Some(1_500_000.0)));
        assert_eq!(parse_credito("1500,50"), Ok(Some(1500.5)));
        assert_eq!(parse_credito("1.500,50"), Ok(Some(1500.5)));
        assert_eq!(parse_credito("2,5"), Ok(Some(2.5)));
        assert_eq!(parse_credito("0"), Ok(None));
    }

    #[test]
    fn test_parse_credito_rejects_other_notations() {
        // English decimals are not guessed at
        assert_eq!(parse_credito("2.5"), Err(CREDITO_FORMATO));
        assert_eq!(parse_credito("1,500.50"), Err(CREDITO_FORMATO));
        assert_eq!(parse_credito("15.00"), Err(CREDITO_FORMATO));
        assert_eq!(parse_credito("1500.000.0"), Err(CREDITO_FORMATO));
        assert_eq!(parse_credito("mucho"), Err(CREDITO_FORMATO));
        assert_eq!(parse_credito("-5"), Err(CREDITO_FORMATO));
    }
}
