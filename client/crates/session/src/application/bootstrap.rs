//! Bootstrap Use Case
//!
//! The once-per-load identity check: ask the backend who the session
//! cookie belongs to and settle the store out of `Validating`. The
//! outcome goes through the generation guard, so a result that arrives
//! after teardown or after a faster sign-in is discarded.

use std::sync::Arc;

use crate::application::config::SessionConfig;
use crate::domain::api::AuthApi;
use crate::domain::entity::Identity;
use crate::error::SessionError;
use crate::store::{MfaWarning, SessionStore};

pub struct BootstrapUseCase<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    store: Arc<SessionStore>,
    config: Arc<SessionConfig>,
}

impl<A> BootstrapUseCase<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, store: Arc<SessionStore>, config: Arc<SessionConfig>) -> Self {
        Self { api, store, config }
    }

    /// Run the initial identity check
    ///
    /// Infallible by design: anything other than a policy-satisfying
    /// identity settles the session as anonymous.
    pub async fn execute(&self) {
        let started = self.store.generation();

        let outcome = match self.api.fetch_identity().await {
            Ok(mut payload) => {
                let warning = payload.mfa_warning.take().map(MfaWarning::from);
                match Identity::from_payload(payload) {
                    Ok(identity) if self.config.access_policy.admits(&identity) => {
                        Some((identity, warning))
                    }
                    Ok(identity) => {
                        tracing::warn!(
                            user_id = %identity.id,
                            "Identity does not satisfy the access policy"
                        );
                        None
                    }
                    Err(error) => {
                        error.log();
                        None
                    }
                }
            }
            Err(SessionError::Unauthenticated) => {
                tracing::debug!("No active session");
                None
            }
            Err(error) => {
                error.log();
                None
            }
        };

        if !self.store.finish_validation(started, outcome) {
            tracing::debug!("Identity check superseded; result discarded");
        }
    }
}
