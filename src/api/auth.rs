use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::UserProfile;
use crate::session::SessionStore;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub fio: String,
    pub phone_number: String,
}

/// The code mailed to the user after registration.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VerificationCode {
    pub code: String,
    pub email: String,
}

pub struct AuthApi<'a> {
    gateway: &'a Gateway,
    session: &'a SessionStore,
}

impl<'a> AuthApi<'a> {
    pub fn new(gateway: &'a Gateway, session: &'a SessionStore) -> Self {
        AuthApi { gateway, session }
    }

    /// Log in, then load the profile and record it as a confirmed session.
    ///
    /// The server sets the session cookies on the login response; the
    /// profile is what the session store keeps.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
        let login_path = self.session.endpoints().login_path.clone();
        self.gateway
            .send(&ApiRequest::post(login_path).json(credentials)?)
            .await?
            .ensure_success()?;

        let profile = self.session.fetch_profile(self.gateway).await?;
        info!(
            event_name = "auth.login",
            event_domain = "auth",
            user_id = profile.id.as_str(),
            "logged in"
        );
        self.session.login(profile.clone());
        Ok(profile)
    }

    /// Create an account. The user must confirm the emailed code before logging in.
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.gateway
            .send(&ApiRequest::post("/auth/register").json(registration)?)
            .await?
            .ensure_success()
    }

    pub async fn verify_code(&self, code: &VerificationCode) -> Result<(), ApiError> {
        self.gateway
            .send(&ApiRequest::post("/auth/verify-code").json(code)?)
            .await?
            .ensure_success()
    }

    /// Ask for a password-reset email.
    pub async fn reset_password(&self, email: &str) -> Result<(), ApiError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ApiError::InvalidRequest("email is required".to_string()));
        }
        let path = format!("/auth/reset-password/{}", urlencoding::encode(email));
        self.gateway
            .send(&ApiRequest::get(path))
            .await?
            .ensure_success()
    }

    pub async fn logout(&self) {
        self.session.logout().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::testing::api_config;
    use crate::config::AuthEndpointsConfig;
    use crate::gateway::build_http_client;
    use crate::storage::{MemoryStorage, ProfileStorage};
    use mockito::{Matcher, Server, ServerGuard};
    use reqwest::cookie::Jar;
    use serde_json::json;

    fn wire(server: &ServerGuard, storage: Arc<MemoryStorage>) -> (Gateway, Arc<SessionStore>) {
        let config = api_config(server);
        let jar = Arc::new(Jar::default());
        let endpoints = AuthEndpointsConfig::default();
        let store = Arc::new(SessionStore::new(
            build_http_client(&config, jar.clone()).unwrap(),
            &config,
            &endpoints,
            storage,
        ));
        let gateway = Gateway::new(
            build_http_client(&config, jar).unwrap(),
            &config,
            &endpoints,
            store.clone(),
        );
        (gateway, store)
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "buyer@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_fetches_profile_and_confirms_session() {
        let mut server = Server::new_async().await;
        let login = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::PartialJson(json!({"email": "buyer@example.com"})))
            .with_status(200)
            .with_header("set-cookie", "access=fresh; Path=/")
            .with_body(r#"{"status": "success"}"#)
            .create_async()
            .await;
        let me = server
            .mock("GET", "/user/me")
            .match_header("cookie", Matcher::Regex("access=fresh".to_string()))
            .with_status(200)
            .with_body(
                json!({"status": "success", "data": {"id": 9, "email": "buyer@example.com", "role": "user", "role_id": 2}})
                    .to_string(),
            )
            .create_async()
            .await;
        let storage = Arc::new(MemoryStorage::new());
        let (gateway, store) = wire(&server, storage.clone());

        let profile = AuthApi::new(&gateway, &store).login(&credentials()).await.unwrap();

        login.assert_async().await;
        me.assert_async().await;
        assert_eq!(profile.id.as_str(), "9");
        assert!(store.session().is_confirmed());
        assert!(storage.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rejected_login_is_not_refreshed() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"status": "error", "message": "Неверный пароль"}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;
        let (gateway, store) = wire(&server, Arc::new(MemoryStorage::new()));

        let err = AuthApi::new(&gateway, &store)
            .login(&credentials())
            .await
            .unwrap_err();

        refresh.assert_async().await;
        assert!(err.is_unauthorized());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_surfaces_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/register")
            .with_status(200)
            .with_body(r#"{"status": "error", "message": "Email уже зарегистрирован"}"#)
            .create_async()
            .await;
        let (gateway, store) = wire(&server, Arc::new(MemoryStorage::new()));
        let registration = Registration {
            email: "buyer@example.com".to_string(),
            password: "secret".to_string(),
            fio: "Сидоров Пётр".to_string(),
            phone_number: "+79000000000".to_string(),
        };

        let err = AuthApi::new(&gateway, &store)
            .register(&registration)
            .await
            .unwrap_err();

        assert_eq!(err.user_message("Ошибка регистрации"), "Email уже зарегистрирован");
    }

    #[tokio::test]
    async fn test_reset_password_requires_email() {
        let mut server = Server::new_async().await;
        let any = server.mock("GET", Matcher::Any).expect(0).create_async().await;
        let (gateway, store) = wire(&server, Arc::new(MemoryStorage::new()));

        let err = AuthApi::new(&gateway, &store)
            .reset_password("  ")
            .await
            .unwrap_err();

        any.assert_async().await;
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_reset_password_encodes_email() {
        let mut server = Server::new_async().await;
        let reset = server
            .mock("GET", "/auth/reset-password/a%2Bb%40example.com")
            .with_status(200)
            .with_body(r#"{"status": "success"}"#)
            .create_async()
            .await;
        let (gateway, store) = wire(&server, Arc::new(MemoryStorage::new()));

        AuthApi::new(&gateway, &store)
            .reset_password("a+b@example.com")
            .await
            .unwrap();

        reset.assert_async().await;
    }
}
