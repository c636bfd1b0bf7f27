//! Session state machine
//!
//! `Anonymous → Authenticated` on a successful passcode exchange;
//! `Authenticated → Anonymous` on logout or when any API call is rejected
//! with 401/403. The state is published on a watch channel so the view
//! layer can redirect to the login screen.

use std::sync::Arc;

use salesdesk_domain::constants::INVALID_PASSCODE_MESSAGE;
use salesdesk_domain::{Result, Role, SalesDeskError, SessionState, StoredCredentials};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::ports::{AuthGateway, CredentialStore};

/// Holds the authentication token and role for the running dashboard
pub struct SessionManager {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create an anonymous session. Call [`restore`](Self::restore) to pick
    /// up credentials persisted by an earlier run.
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self { gateway, store, state }
    }

    /// Load persisted credentials.
    ///
    /// # Returns
    /// `true` if the session is now authenticated.
    ///
    /// # Errors
    /// Returns the store error; the session stays anonymous.
    pub fn restore(&self) -> Result<bool> {
        match self.store.load()? {
            Some(credentials) if !credentials.token.is_empty() => {
                debug!(role = %credentials.role, "restored persisted session");
                self.state.send_replace(SessionState::Authenticated(credentials));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Exchange a passcode for a session.
    ///
    /// # Errors
    /// - `Validation` for an empty passcode (no request is made)
    /// - `AuthRejected("Invalid passcode")` when the backend refuses it; the
    ///   token and role stay unset
    /// - `Network` when the backend cannot be reached
    pub async fn login(&self, passcode: &str) -> Result<Role> {
        let passcode = passcode.trim();
        if passcode.is_empty() {
            return Err(SalesDeskError::Validation("Passcode is required".into()));
        }

        let response = self.gateway.exchange_passcode(passcode).await.map_err(|err| match err {
            SalesDeskError::AuthRejected(_) => {
                info!("login rejected");
                SalesDeskError::AuthRejected(INVALID_PASSCODE_MESSAGE.into())
            }
            other => {
                warn!(error = %other, kind = other.label(), "login request failed");
                other
            }
        })?;

        if response.access_token.trim().is_empty() {
            return Err(SalesDeskError::Internal("login response carried an empty token".into()));
        }

        let credentials = StoredCredentials::from(response);
        if let Err(err) = self.store.save(&credentials) {
            // Still usable for this run, just not remembered.
            warn!(error = %err, "failed to persist session credentials");
        }

        let role = credentials.role.clone();
        self.state.send_replace(SessionState::Authenticated(credentials));
        info!(%role, "login successful");
        Ok(role)
    }

    /// Explicit logout. Always ends anonymous.
    pub fn logout(&self) {
        self.drop_credentials();
        self.state.send_replace(SessionState::Anonymous);
        info!("logged out");
    }

    /// Forced transition after an API call carrying `rejected_token` was
    /// refused with 401/403.
    ///
    /// Only ends the session when `rejected_token` is still the current
    /// token; a late rejection of a token that has since been replaced by a
    /// new login is ignored. Safe to call from several failing requests at
    /// once. Returns `true` if this call ended the session.
    pub fn handle_auth_rejected(&self, rejected_token: &str) -> bool {
        let ended = self.state.send_if_modified(|state| {
            if state.token() == Some(rejected_token) {
                *state = SessionState::Anonymous;
                true
            } else {
                false
            }
        });

        if ended {
            self.drop_credentials();
            warn!("session rejected by backend; returning to login");
        } else {
            debug!("ignoring rejection of a token that is no longer current");
        }
        ended
    }

    /// Current bearer token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn drop_credentials(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear persisted session credentials");
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use salesdesk_domain::LoginResponse;

    use super::*;
    use crate::session::MemoryCredentialStore;

    struct PasscodeGateway {
        expected: String,
        calls: Mutex<usize>,
    }

    impl PasscodeGateway {
        fn new(expected: &str) -> Self {
            Self { expected: expected.to_string(), calls: Mutex::new(0) }
        }
    }

    #[async_trait]
    impl AuthGateway for PasscodeGateway {
        async fn exchange_passcode(&self, passcode: &str) -> Result<LoginResponse> {
            *self.calls.lock() += 1;
            if passcode == self.expected {
                Ok(LoginResponse { access_token: "token-1".into(), role: Role::Admin })
            } else {
                Err(SalesDeskError::AuthRejected("401 Unauthorized".into()))
            }
        }
    }

    fn manager(store: Arc<MemoryCredentialStore>) -> (SessionManager, Arc<PasscodeGateway>) {
        let gateway = Arc::new(PasscodeGateway::new("2468"));
        (SessionManager::new(gateway.clone(), store), gateway)
    }

    #[tokio::test]
    async fn wrong_passcode_leaves_session_unset() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (session, _) = manager(store.clone());

        let err = session.login("0000").await.unwrap_err();
        assert_eq!(err, SalesDeskError::AuthRejected("Invalid passcode".into()));
        assert_eq!(err.user_message(), "Invalid passcode");
        assert!(session.token().is_none());
        assert!(session.role().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn successful_login_persists_credentials() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (session, _) = manager(store.clone());

        let role = session.login(" 2468 ").await.unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(session.token().as_deref(), Some("token-1"));
        assert_eq!(store.load().unwrap().map(|c| c.token), Some("token-1".to_string()));
    }

    #[tokio::test]
    async fn empty_passcode_makes_no_request() {
        let (session, gateway) = manager(Arc::new(MemoryCredentialStore::new()));
        assert!(matches!(session.login("   ").await, Err(SalesDeskError::Validation(_))));
        assert_eq!(*gateway.calls.lock(), 0);
    }

    #[tokio::test]
    async fn logout_clears_store_and_notifies() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (session, _) = manager(store.clone());
        session.login("2468").await.unwrap();

        let mut rx = session.subscribe();
        session.logout();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn restore_picks_up_persisted_session() {
        let store = Arc::new(MemoryCredentialStore::with_credentials(StoredCredentials {
            token: "persisted".into(),
            role: Role::Staff,
        }));
        let (session, _) = manager(store);

        assert!(session.restore().unwrap());
        assert_eq!(session.token().as_deref(), Some("persisted"));
        assert_eq!(session.role(), Some(Role::Staff));
    }

    #[tokio::test]
    async fn repeated_rejections_each_force_anonymous() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (session, _) = manager(store.clone());
        session.login("2468").await.unwrap();

        assert!(session.handle_auth_rejected("token-1"));
        assert!(!session.handle_auth_rejected("token-1"));
        assert!(!session.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn rejection_of_replaced_token_keeps_new_session() {
        let store = Arc::new(MemoryCredentialStore::with_credentials(StoredCredentials {
            token: "token-0".into(),
            role: Role::Staff,
        }));
        let (session, _) = manager(store.clone());
        session.restore().unwrap();
        session.login("2468").await.unwrap();

        let mut rx = session.subscribe();
        assert!(!session.handle_auth_rejected("token-0"));

        assert!(!rx.has_changed().unwrap());
        assert_eq!(session.token().as_deref(), Some("token-1"));
        assert_eq!(store.load().unwrap().map(|c| c.token), Some("token-1".to_string()));
    }
}
