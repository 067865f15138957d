use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// None = loading or failed
    #[prop(into)]
    value: Signal<Option<usize>>,
    /// Modifier appended to `stat-card`, e.g. "warning"
    #[prop(optional)]
    variant: &'static str,
) -> impl IntoView {
    let class = if variant.is_empty() {
        "stat-card".to_string()
    } else {
        format!("stat-card stat-card--{}", variant)
    };

    view! {
        <div class=class>
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__body">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())}
                </div>
            </div>
        </div>
    }
}
