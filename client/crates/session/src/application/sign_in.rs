//! Sign-In Use Case
//!
//! Credential submission. Exactly one backend attempt per call; any
//! retry is an explicit user action. The backend answers with either a
//! full identity or a second-factor challenge.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::application::config::SessionConfig;
use crate::domain::api::{AuthApi, LoginOutcome};
use crate::domain::entity::{Identity, MfaChallenge};
use crate::dto::LoginRequest;
use crate::error::{SessionError, SessionResult};
use crate::store::{MfaWarning, SessionStore};

/// Credentials as entered by the user
pub struct SignInInput {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl SignInInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

/// What the caller should render next
#[derive(Debug)]
pub enum SignInOutput {
    /// Signed in; the store now holds this identity
    Authenticated(Identity),
    /// Password accepted; present the second-factor form
    MfaRequired,
}

pub struct SignInUseCase<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    store: Arc<SessionStore>,
    config: Arc<SessionConfig>,
}

impl<A> SignInUseCase<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, store: Arc<SessionStore>, config: Arc<SessionConfig>) -> Self {
        Self { api, store, config }
    }

    pub async fn execute(&self, input: SignInInput) -> SessionResult<SignInOutput> {
        let request = LoginRequest {
            email: input.email.trim().to_string(),
            password: input.password.to_string(),
        };

        let outcome = match self.api.login(request).await {
            Ok(outcome) => outcome,
            Err(error) => {
                error.log();
                return Err(error);
            }
        };

        match outcome {
            LoginOutcome::Authenticated(mut payload) => {
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
                tracing::info!(user_id = %identity.id, "User signed in");
                self.store.set_authenticated(identity.clone(), warning);
                Ok(SignInOutput::Authenticated(identity))
            }
            LoginOutcome::MfaRequired { mfa_token } => {
                tracing::info!("Sign-in requires a second factor");
                self.store.set_mfa_pending(MfaChallenge::new(mfa_token));
                Ok(SignInOutput::MfaRequired)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{StubApi, platform_payload, tenant_payload};

    fn use_case(api: StubApi) -> (SignInUseCase<StubApi>, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new());
        let uc = SignInUseCase::new(
            Arc::new(api),
            Arc::clone(&store),
            Arc::new(SessionConfig::admin_portal()),
        );
        (uc, store)
    }

    #[tokio::test]
    async fn test_sign_in_without_mfa() {
        let api = StubApi::new();
        api.queue_login(Ok(LoginOutcome::Authenticated(platform_payload())));
        let (uc, store) = use_case(api);

        let output = uc.execute(SignInInput::new("ops@example.com", "pw")).await;

        assert!(matches!(output, Ok(SignInOutput::Authenticated(_))));
        assert!(store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_credentials_keep_session_anonymous() {
        let api = StubApi::new();
        api.queue_login(Err(SessionError::InvalidCredentials));
        let (uc, store) = use_case(api);
        store.set_anonymous();

        let output = uc.execute(SignInInput::new("ops@example.com", "bad")).await;

        assert!(matches!(output, Err(SessionError::InvalidCredentials)));
        assert!(!store.snapshot().is_authenticated());
        assert!(store.snapshot().challenge().is_none());
    }

    #[tokio::test]
    async fn test_mfa_required_stores_challenge_without_identity() {
        let api = StubApi::new();
        api.queue_login(Ok(LoginOutcome::MfaRequired {
            mfa_token: "chal-1".to_string(),
        }));
        let (uc, store) = use_case(api);

        let output = uc.execute(SignInInput::new("ops@example.com", "pw")).await;

        assert!(matches!(output, Ok(SignInOutput::MfaRequired)));
        let state = store.snapshot();
        assert!(!state.is_authenticated());
        assert_eq!(state.challenge().unwrap().token(), "chal-1");
    }

    #[tokio::test]
    async fn test_mfa_setup_required_surfaces_distinct_error() {
        let api = StubApi::new();
        api.queue_login(Err(SessionError::MfaSetupRequired));
        let (uc, store) = use_case(api);

        let output = uc.execute(SignInInput::new("ops@example.com", "pw")).await;

        assert!(matches!(output, Err(SessionError::MfaSetupRequired)));
        assert!(store.snapshot().challenge().is_none());
    }

    #[tokio::test]
    async fn test_policy_failure_denies_access() {
        let api = StubApi::new();
        api.queue_login(Ok(LoginOutcome::Authenticated(tenant_payload())));
        let (uc, store) = use_case(api);

        let output = uc.execute(SignInInput::new("user@example.com", "pw")).await;

        assert!(matches!(output, Err(SessionError::AccessDenied)));
        assert!(!store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_malformed_identity_payload_is_rejected() {
        let api = StubApi::new();
        let mut payload = platform_payload();
        payload.email = None;
        api.queue_login(Ok(LoginOutcome::Authenticated(payload)));
        let (uc, store) = use_case(api);

        let output = uc.execute(SignInInput::new("ops@example.com", "pw")).await;

        assert!(matches!(output, Err(SessionError::InvalidIdentity(_))));
        assert!(!store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_email_is_trimmed_before_submission() {
        let api = StubApi::new();
        api.queue_login(Ok(LoginOutcome::Authenticated(platform_payload())));
        let (uc, _store) = use_case(api);

        let output = uc
            .execute(SignInInput::new("  ops@example.com  ", "pw"))
            .await;

        assert!(output.is_ok());
    }
}
