use contracts::system::auth::{Session, SessionUser};
use contracts::system::roles::Role;
use contracts::system::routes::AppRoute;
use leptos::prelude::*;

use super::{api, expiry, storage};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::http::ApiError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

impl AuthState {
    pub fn user(&self) -> Option<&SessionUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Auth context provider component.
///
/// Restores the stored session synchronously so the first render already
/// knows whether to show the login page.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let restored = storage::load_session();
    if let Some(session) = &restored {
        log::info!("Session restored for {} ({})", session.user.email, session.user.role);
    }
    let (auth_state, set_auth_state) = signal(AuthState { session: restored });

    let nav = use_context::<AppGlobalContext>();
    expiry::set_expired_handler(move || {
        set_auth_state.set(AuthState::default());
        if let Some(ctx) = nav {
            ctx.navigate(AppRoute::Login);
        }
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform login. The `/token` response is validated here, once.
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    email: String,
    password: String,
) -> Result<Session, ApiError> {
    let email = email.trim().to_string();
    let response = api::login(email.clone(), password).await?;
    let session = Session::from_token_response(&email, response)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    storage::save_session(&session);
    expiry::rearm();
    log::info!("Logged in as {} ({})", session.user.email, session.user.role);

    set_auth_state.set(AuthState {
        session: Some(session.clone()),
    });
    Ok(session)
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
    log::info!("Logged out");
}

/// Replace the session (e.g. after a profile or password change) in both
/// context and storage.
pub fn update_session(set_auth_state: WriteSignal<AuthState>, f: impl FnOnce(&mut Session)) {
    set_auth_state.update(|state| {
        if let Some(session) = state.session.as_mut() {
            f(session);
            storage::save_session(session);
        }
    });
}
