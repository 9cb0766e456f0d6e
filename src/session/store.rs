use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::state::{Session, SessionPhase};
use crate::config::{ApiConfig, AuthEndpointsConfig};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, ApiResponse, Gateway, SessionControl};
use crate::models::UserProfile;
use crate::storage::ProfileStorage;

/// The profile endpoint answers either `{ data: User }` or a bare `User`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileBody {
    Wrapped { data: UserProfile },
    Bare(UserProfile),
}

impl ProfileBody {
    fn into_profile(self) -> UserProfile {
        match self {
            ProfileBody::Wrapped { data } => data,
            ProfileBody::Bare(profile) => profile,
        }
    }
}

/// Holds the session and is the only place it changes.
///
/// Refresh and logout notification use `http`, a client that shares the
/// gateway's cookie jar but not its 401 handling.
pub struct SessionStore {
    state: watch::Sender<Session>,
    storage: Arc<dyn ProfileStorage>,
    http: reqwest::Client,
    base_url: String,
    endpoints: AuthEndpointsConfig,
}

impl SessionStore {
    pub fn new(
        http: reqwest::Client,
        api: &ApiConfig,
        endpoints: &AuthEndpointsConfig,
        storage: Arc<dyn ProfileStorage>,
    ) -> Self {
        let (state, _) = watch::channel(Session::anonymous());
        SessionStore {
            state,
            storage,
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            endpoints: endpoints.clone(),
        }
    }

    pub fn endpoints(&self) -> &AuthEndpointsConfig {
        &self.endpoints
    }

    /// Current snapshot.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user().cloned()
    }

    /// Record a server-confirmed profile and persist it for the next start.
    pub fn login(&self, profile: UserProfile) {
        self.persist(&profile);
        info!(
            event_name = "session.login",
            event_domain = "session",
            user_id = profile.id.as_str(),
            is_admin = profile.is_admin(),
            "session authenticated"
        );
        self.replace(Session::with_user(
            Some(profile),
            SessionPhase::Authenticated { confirmed: true },
            false,
        ));
    }

    /// Tell the server (best effort), then drop the local session and the persisted copy.
    pub async fn logout(&self) {
        let url = self.url(&self.endpoints.logout_path);
        match self.http.post(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Server acknowledged logout");
            }
            Ok(response) => warn!(
                event_name = "session.logout.server_rejected",
                event_domain = "session",
                status = response.status().as_u16(),
                "logout notification rejected by server"
            ),
            Err(e) => warn!(
                event_name = "session.logout.server_unreachable",
                event_domain = "session",
                error = %e,
                "logout notification failed"
            ),
        }
        self.clear();
    }

    /// Ask the server who we are. Success confirms the session; any failure ends it.
    pub async fn check_auth(&self, gateway: &Gateway) -> Session {
        self.state
            .send_modify(|session| session.set_phase(SessionPhase::Checking, true));

        match self.fetch_profile(gateway).await {
            Ok(profile) => self.login(profile),
            Err(e) => {
                warn!(
                    event_name = "session.check.failed",
                    event_domain = "session",
                    error = %e,
                    "session check failed; logging out"
                );
                if self.is_authenticated() {
                    self.logout().await;
                } else {
                    // a failed refresh during the check has already notified the server
                    self.clear();
                }
            }
        }
        self.session()
    }

    /// The current user as the server sees it. A profile without an id is rejected.
    pub async fn fetch_profile(&self, gateway: &Gateway) -> Result<UserProfile, ApiError> {
        let request = ApiRequest::get(self.endpoints.profile_path.clone());
        let profile = gateway
            .send(&request)
            .await?
            .json::<ProfileBody>()?
            .into_profile();
        if profile.id.is_empty() {
            return Err(ApiError::Decode("profile without id".to_string()));
        }
        Ok(profile)
    }

    /// Renew the access credential. Leaves the session untouched either way.
    pub async fn refresh_token(&self) -> Result<(), ApiError> {
        let url = self.url(&self.endpoints.refresh_path);
        let response = self.http.post(&url).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                path: self.endpoints.refresh_path.clone(),
            });
        }
        let body = response.bytes().await?.to_vec();
        ApiResponse::new(status, body).error_for_status().map(|_| ())
    }

    /// Restore the persisted profile before any network call.
    ///
    /// The result is authenticated but unconfirmed until `check_auth` runs.
    /// Unreadable or malformed data is discarded.
    pub fn hydrate(&self) {
        if !self.storage.is_enabled() {
            debug!("Profile persistence is disabled; nothing to restore");
            return;
        }
        let raw = match self.storage.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                warn!(
                    event_name = "session.hydrate.unreadable",
                    event_domain = "session",
                    error = %e,
                    "could not read persisted profile"
                );
                return;
            }
        };

        self.state.send_modify(|session| {
            let loading = session.is_loading();
            session.set_phase(SessionPhase::Hydrating, loading);
        });

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) if !profile.id.is_empty() => {
                debug!("Restored persisted profile for user '{}'", profile.id);
                self.replace(Session::with_user(
                    Some(profile),
                    SessionPhase::Authenticated { confirmed: false },
                    false,
                ));
            }
            Ok(_) | Err(_) => {
                warn!(
                    event_name = "session.hydrate.malformed",
                    event_domain = "session",
                    "discarding malformed persisted profile"
                );
                if let Err(e) = self.storage.remove() {
                    warn!("Failed to remove malformed profile: {}", e);
                }
                self.replace(Session::anonymous());
            }
        }
    }

    fn clear(&self) {
        if let Err(e) = self.storage.remove() {
            warn!("Failed to remove persisted profile: {}", e);
        }
        info!(
            event_name = "session.logout",
            event_domain = "session",
            "session cleared"
        );
        self.replace(Session::anonymous());
    }

    fn persist(&self, profile: &UserProfile) {
        let result = serde_json::to_string(profile)
            .map_err(ApiError::from)
            .and_then(|raw| self.storage.save(&raw));
        if let Err(e) = result {
            warn!("Failed to persist profile: {}", e);
        }
    }

    /// Every state change goes through here.
    fn replace(&self, session: Session) {
        debug_assert!(session.invariant_holds());
        self.state.send_replace(session);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SessionControl for SessionStore {
    async fn refresh_token(&self) -> Result<(), ApiError> {
        SessionStore::refresh_token(self).await
    }

    async fn logout(&self) {
        SessionStore::logout(self).await
    }
}
