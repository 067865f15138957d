use leptos::prelude::*;

/// Inline error text under a form or above a table.
#[component]
pub fn ErrorMessage(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|m| view! {
            <div class="alert alert--error" role="alert">{m}</div>
        })}
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|m| view! {
            <div class="alert alert--success" role="status">{m}</div>
        })}
    }
}
