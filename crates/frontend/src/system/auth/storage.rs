use contracts::system::auth::Session;
use web_sys::window;

use crate::shared::config::config;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn storage_key() -> &'static str {
    &config().session.storage_key
}

/// Parses a stored session; anything unreadable counts as no session.
pub fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) if !session.token.trim().is_empty() => Some(session),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Discarding stored session: {}", e);
            None
        }
    }
}

/// Save session to localStorage
pub fn save_session(session: &Session) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(session) {
        Ok(raw) => {
            let _ = storage.set_item(storage_key(), &raw);
        }
        Err(e) => log::error!("Failed to serialize session: {}", e),
    }
}

/// Load session from localStorage, dropping it when it cannot be parsed
pub fn load_session() -> Option<Session> {
    let storage = get_local_storage()?;
    let raw = storage.get_item(storage_key()).ok()??;
    let session = decode_session(&raw);
    if session.is_none() {
        let _ = storage.remove_item(storage_key());
    }
    session
}

/// Bearer token of the stored session
pub fn get_access_token() -> Option<String> {
    load_session().map(|s| s.token)
}

pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(storage_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::SessionUser;
    use contracts::system::roles::Role;

    #[test]
    fn test_decode_session_roundtrip() {
        let session = Session {
            token: "abc.def".into(),
            user: SessionUser {
                email: "director@svan.es".into(),
                name: "Dirección".into(),
                role: Role::Director,
                is_temporary_password: false,
                permissions: vec![],
            },
        };
        let raw = serde_json::to_string(&session).unwrap();
        assert_eq!(decode_session(&raw), Some(session));
    }

    #[test]
    fn test_decode_session_rejects_garbage() {
        assert_eq!(decode_session("not json"), None);
        assert_eq!(decode_session(r#"{"token":"x","user":{"email":"a","name":"b","role":"jefe"}}"#), None);
        assert_eq!(
            decode_session(r#"{"token":"  ","user":{"email":"a","name":"b","role":"admin"}}"#),
            None
        );
    }
}
