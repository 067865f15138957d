use contracts::system::auth::{LoginForm, TokenResponse};

use crate::shared::http::{self, ApiError};

/// `POST /token` with a form-encoded body. Credentials errors come back as
/// `ApiError::Http { status: 401, .. }`, they do not expire anything.
pub async fn login(email: String, password: String) -> Result<TokenResponse, ApiError> {
    let form = LoginForm {
        username: email,
        password,
    };
    let body = serde_qs::to_string(&form)
        .map_err(|e| ApiError::Validation(format!("Failed to encode login form: {}", e)))?;
    http::post_urlencoded("/token", body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_is_urlencoded() {
        let form = LoginForm {
            username: "comercial@svan.es".into(),
            password: "p&ss word".into(),
        };
        let body = serde_qs::to_string(&form).unwrap();
        assert!(body.starts_with("username=comercial"));
        assert!(body.contains("&password=p"));
        assert!(!body.contains(' '));
        assert!(!body.contains("p&ss"));
    }
}
