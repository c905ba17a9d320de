//! MFA Verification Use Case
//!
//! Exchanges a pending challenge plus a second factor for a full
//! identity. TOTP codes and backup codes are separate endpoints,
//! selected by which input mode the user chose, never inferred from
//! the shape of what they typed.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::application::config::SessionConfig;
use crate::domain::api::AuthApi;
use crate::domain::entity::Identity;
use crate::error::{SessionError, SessionResult};
use crate::store::{MfaWarning, SessionStore};

/// Second factor as chosen by the user
pub enum SecondFactor {
    /// Time-based one-time code from an authenticator app
    Totp(Zeroizing<String>),
    /// Single-use backup code
    BackupCode(Zeroizing<String>),
}

impl SecondFactor {
    pub fn totp(code: impl Into<String>) -> Self {
        Self::Totp(Zeroizing::new(code.into()))
    }

    pub fn backup_code(code: impl Into<String>) -> Self {
        Self::BackupCode(Zeroizing::new(code.into()))
    }
}

pub struct MfaVerifyUseCase<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    store: Arc<SessionStore>,
    config: Arc<SessionConfig>,
}

impl<A> MfaVerifyUseCase<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, store: Arc<SessionStore>, config: Arc<SessionConfig>) -> Self {
        Self { api, store, config }
    }

    /// Submit a second factor for the pending challenge
    ///
    /// A rejected factor leaves the challenge in place so the user can
    /// retry with the same token.
    pub async fn execute(&self, factor: SecondFactor) -> SessionResult<Identity> {
        let challenge = match self.store.snapshot().challenge().cloned() {
            Some(challenge) => challenge,
            None => return Err(SessionError::NoPendingChallenge),
        };

        let result = match &factor {
            SecondFactor::Totp(code) => self.api.verify_totp(challenge.token(), code).await,
            SecondFactor::BackupCode(code) => {
                self.api.redeem_backup_code(challenge.token(), code).await
            }
        };

        let mut payload = match result {
            Ok(payload) => payload,
            Err(error) => {
                // Challenge stays pending for another attempt
                error.log();
                return Err(error);
            }
        };

        let warning = payload.mfa_warning.take().map(MfaWarning::from);
        let identity = match Identity::from_payload(payload) {
            Ok(identity) => identity,
            Err(error) => {
                error.log();
                self.store.set_anonymous();
                return Err(error);
            }
        };
        if !self.config.access_policy.admits(&identity) {
            let error = SessionError::AccessDenied;
            error.log();
            self.store.set_anonymous();
            return Err(error);
        }

        tracing::info!(user_id = %identity.id, "Second factor accepted");
        self.store.set_authenticated(identity.clone(), warning);
        Ok(identity)
    }

    /// Abandon the pending challenge and return to the credential form
    pub fn cancel(&self) {
        tracing::debug!("Second-factor challenge cancelled");
        self.store.cancel_mfa();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{StubApi, platform_payload};
    use crate::domain::entity::MfaChallenge;
    use std::sync::atomic::Ordering;

    fn use_case(api: StubApi) -> (MfaVerifyUseCase<StubApi>, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new());
        let uc = MfaVerifyUseCase::new(
            Arc::new(api),
            Arc::clone(&store),
            Arc::new(SessionConfig::admin_portal()),
        );
        (uc, store)
    }

    fn pending(store: &SessionStore, token: &str) {
        store.set_mfa_pending(MfaChallenge::new(token.to_string()));
    }

    #[tokio::test]
    async fn test_totp_routes_to_totp_endpoint() {
        let api = StubApi::new();
        api.queue_verify(Ok(platform_payload()));
        let (uc, store) = use_case(api);
        pending(&store, "chal-1");

        uc.execute(SecondFactor::totp("123456")).await.unwrap();

        assert_eq!(uc.api.verify_calls.load(Ordering::SeqCst), 1);
        assert_eq!(uc.api.backup_calls.load(Ordering::SeqCst), 0);
        assert!(store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_backup_code_routes_to_backup_endpoint() {
        let api = StubApi::new();
        api.queue_backup(Ok(platform_payload()));
        let (uc, store) = use_case(api);
        pending(&store, "chal-1");

        uc.execute(SecondFactor::backup_code("AAAA-BBBB"))
            .await
            .unwrap();

        assert_eq!(uc.api.verify_calls.load(Ordering::SeqCst), 0);
        assert_eq!(uc.api.backup_calls.load(Ordering::SeqCst), 1);
        assert!(store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_challenge_for_retry() {
        let api = StubApi::new();
        api.queue_verify(Err(SessionError::InvalidSecondFactor));
        api.queue_verify(Ok(platform_payload()));
        let (uc, store) = use_case(api);
        pending(&store, "chal-1");

        let first = uc.execute(SecondFactor::totp("000000")).await;
        assert!(matches!(first, Err(SessionError::InvalidSecondFactor)));
        assert_eq!(store.snapshot().challenge().unwrap().token(), "chal-1");

        uc.execute(SecondFactor::totp("123456")).await.unwrap();
        assert!(store.snapshot().is_authenticated());

        // Both attempts presented the same challenge token
        let tokens = uc.api.seen_tokens.lock().unwrap().clone();
        assert_eq!(tokens, vec!["chal-1", "chal-1"]);
    }

    #[tokio::test]
    async fn test_no_pending_challenge_is_rejected_locally() {
        let api = StubApi::new();
        let (uc, store) = use_case(api);
        store.set_anonymous();

        let output = uc.execute(SecondFactor::totp("123456")).await;

        assert!(matches!(output, Err(SessionError::NoPendingChallenge)));
        assert_eq!(uc.api.verify_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_discards_challenge() {
        let api = StubApi::new();
        let (uc, store) = use_case(api);
        pending(&store, "chal-1");

        uc.cancel();

        assert!(store.snapshot().challenge().is_none());
        assert!(!store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_verified_identity_matches_direct_login_shape() {
        let api = StubApi::new();
        api.queue_verify(Ok(platform_payload()));
        let (uc, store) = use_case(api);
        pending(&store, "chal-1");

        let identity = uc.execute(SecondFactor::totp("123456")).await.unwrap();

        assert_eq!(identity.id.as_str(), "u-1");
        assert_eq!(identity.email.as_str(), "ops@example.com");
        assert!(identity.permissions.contains("portal.view"));
        assert_eq!(
            store.snapshot().identity().unwrap().id.as_str(),
            identity.id.as_str()
        );
    }
}
