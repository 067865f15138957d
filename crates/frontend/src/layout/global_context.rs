use contracts::system::routes::AppRoute;
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::window;

fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Application-wide UI state: the current page and sidebar visibility.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub route: RwSignal<AppRoute>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            route: RwSignal::new(AppRoute::from_path(&current_path())),
            left_open: RwSignal::new(true),
        }
    }

    pub fn navigate(&self, route: AppRoute) {
        if self.route.get_untracked() != route {
            log::debug!("navigate: {}", route.to_path());
            self.route.set(route);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|v| *v = !*v);
    }

    /// Keeps the address bar and the route signal in sync: route changes
    /// push a history entry, back/forward buttons update the route.
    pub fn init_router_integration(&self) {
        let this = *self;

        let on_popstate = window_event_listener(leptos::ev::popstate, move |_| {
            let route = AppRoute::from_path(&current_path());
            this.route.set(route);
        });
        // Lives as long as the page.
        std::mem::forget(on_popstate);

        Effect::new(move |_| {
            let path = this.route.get().to_path();
            if current_path() != path {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&path));
                    }
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
