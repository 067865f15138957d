//! PageFrame — root wrapper for every page rendered in the shell.
//!
//! Sets `id` (`"{entity}--{category}"`, e.g. `"a001_solicitud--pending"`) and
//! `data-page-category` on the root element.

use leptos::prelude::*;

/// Table of records.
pub const PAGE_CAT_LIST: &str = "list";
/// Form for a single record or the current user.
pub const PAGE_CAT_DETAIL: &str = "detail";
/// Summary cards.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
/// Login and user administration.
pub const PAGE_CAT_SYSTEM: &str = "system";

fn frame_class(category: &str, extra: &str) -> String {
    let base = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };
    if extra.is_empty() {
        base.to_string()
    } else {
        format!("{base} {extra}")
    }
}

#[component]
pub fn PageFrame(
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants.
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class=frame_class(category, class) data-page-category=category>
            {children()}
        </div>
    }
}

/// Standard page header: title on the left, actions on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{title}</h1>
                {subtitle.map(|s| view! { <p class="page__subtitle">{s}</p> })}
            </div>
            <div class="page__header-right">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
