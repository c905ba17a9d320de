//! Shared test doubles for the use-case tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use crate::domain::api::{AuthApi, LoginOutcome};
use crate::dto::{IdentityPayload, LoginRequest};
use crate::error::{SessionError, SessionResult};

/// In-memory backend: responses are queued per endpoint and popped in
/// order. An empty queue behaves like an unauthenticated backend.
pub(crate) struct StubApi {
    pub me: Mutex<VecDeque<SessionResult<IdentityPayload>>>,
    pub login: Mutex<VecDeque<SessionResult<LoginOutcome>>>,
    pub verify: Mutex<VecDeque<SessionResult<IdentityPayload>>>,
    pub backup: Mutex<VecDeque<SessionResult<IdentityPayload>>>,
    pub logout: Mutex<VecDeque<SessionResult<()>>>,
    pub logout_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub backup_calls: AtomicUsize,
    /// Challenge tokens presented with second-factor submissions
    pub seen_tokens: Mutex<Vec<String>>,
    /// When set, `fetch_identity` waits for a notification first
    pub me_gate: Option<Arc<Notify>>,
    /// When set, notified as soon as `fetch_identity` is entered
    pub me_started: Option<Arc<Notify>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            me: Mutex::new(VecDeque::new()),
            login: Mutex::new(VecDeque::new()),
            verify: Mutex::new(VecDeque::new()),
            backup: Mutex::new(VecDeque::new()),
            logout: Mutex::new(VecDeque::new()),
            logout_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            backup_calls: AtomicUsize::new(0),
            seen_tokens: Mutex::new(Vec::new()),
            me_gate: None,
            me_started: None,
        }
    }

    pub fn queue_me(&self, result: SessionResult<IdentityPayload>) {
        self.me.lock().unwrap().push_back(result);
    }

    pub fn queue_login(&self, result: SessionResult<LoginOutcome>) {
        self.login.lock().unwrap().push_back(result);
    }

    pub fn queue_verify(&self, result: SessionResult<IdentityPayload>) {
        self.verify.lock().unwrap().push_back(result);
    }

    pub fn queue_backup(&self, result: SessionResult<IdentityPayload>) {
        self.backup.lock().unwrap().push_back(result);
    }

    pub fn queue_logout(&self, result: SessionResult<()>) {
        self.logout.lock().unwrap().push_back(result);
    }
}

impl AuthApi for StubApi {
    async fn fetch_identity(&self) -> SessionResult<IdentityPayload> {
        if let Some(started) = &self.me_started {
            started.notify_one();
        }
        if let Some(gate) = &self.me_gate {
            gate.notified().await;
        }
        self.me
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SessionError::Unauthenticated))
    }

    async fn login(&self, _request: LoginRequest) -> SessionResult<LoginOutcome> {
        self.login
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SessionError::InvalidCredentials))
    }

    async fn refresh(&self) -> SessionResult<()> {
        Ok(())
    }

    async fn logout(&self) -> SessionResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn verify_totp(&self, mfa_token: &str, _code: &str) -> SessionResult<IdentityPayload> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens.lock().unwrap().push(mfa_token.to_string());
        self.verify
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SessionError::InvalidSecondFactor))
    }

    async fn redeem_backup_code(
        &self,
        mfa_token: &str,
        _backup_code: &str,
    ) -> SessionResult<IdentityPayload> {
        self.backup_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens.lock().unwrap().push(mfa_token.to_string());
        self.backup
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SessionError::InvalidSecondFactor))
    }
}

/// Payload for a platform operator that passes the default policy
pub(crate) fn platform_payload() -> IdentityPayload {
    IdentityPayload {
        id: Some("u-1".to_string()),
        email: Some("ops@example.com".to_string()),
        name: Some("Ada".to_string()),
        role: Some("admin".to_string()),
        permissions: vec!["portal.view".to_string()],
        user_type: Some("platform".to_string()),
        mfa_warning: None,
    }
}

/// Payload for a tenant user, rejected by the admin-portal policy
pub(crate) fn tenant_payload() -> IdentityPayload {
    IdentityPayload {
        id: Some("u-2".to_string()),
        email: Some("user@example.com".to_string()),
        name: Some("Taro".to_string()),
        role: Some("member".to_string()),
        permissions: vec![],
        user_type: Some("tenant".to_string()),
        mfa_warning: None,
    }
}
