use crate::models::UserProfile;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    /// A persisted profile is being restored.
    Hydrating,
    /// `confirmed` is false while the profile only comes from local persistence.
    Authenticated { confirmed: bool },
    /// The server is being asked for the current profile.
    Checking,
}

/// Snapshot of the session. Only `SessionStore` can produce a changed one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    phase: SessionPhase,
    authenticated: bool,
    user: Option<UserProfile>,
    is_admin: bool,
    loading: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(
        user: Option<UserProfile>,
        phase: SessionPhase,
        loading: bool,
    ) -> Self {
        let is_admin = user.as_ref().map_or(false, UserProfile::is_admin);
        Session {
            phase,
            authenticated: user.is_some(),
            user,
            is_admin,
            loading,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase, loading: bool) {
        self.phase = phase;
        self.loading = loading;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_confirmed(&self) -> bool {
        self.phase == SessionPhase::Authenticated { confirmed: true }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// `is_admin` implies an authenticated session with a profile.
    pub fn invariant_holds(&self) -> bool {
        !self.is_admin || (self.authenticated && self.user.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Id;

    fn admin() -> UserProfile {
        UserProfile {
            id: Id::from(1),
            email: "admin@example.com".to_string(),
            fio: String::new(),
            phone_number: String::new(),
            role: "admin".to_string(),
            role_id: 1,
        }
    }

    #[test]
    fn test_admin_flag_derived_from_profile() {
        let session = Session::with_user(
            Some(admin()),
            SessionPhase::Authenticated { confirmed: true },
            false,
        );
        assert!(session.is_admin());
        assert!(session.is_authenticated());
        assert!(session.is_confirmed());
        assert!(session.invariant_holds());
    }

    #[test]
    fn test_no_user_means_no_admin() {
        let session = Session::with_user(None, SessionPhase::Anonymous, false);
        assert!(!session.is_admin());
        assert!(!session.is_authenticated());
        assert_eq!(session, Session::anonymous());
    }
}
