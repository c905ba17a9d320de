//! Sign-Out Use Case
//!
//! Best-effort backend invalidation followed by an unconditional local
//! clear. The local session never survives a failed logout call.

use std::sync::Arc;

use crate::domain::api::AuthApi;
use crate::store::SessionStore;

pub struct SignOutUseCase<A>
where
    A: AuthApi,
{
    api: Arc<A>,
    store: Arc<SessionStore>,
}

impl<A> SignOutUseCase<A>
where
    A: AuthApi,
{
    pub fn new(api: Arc<A>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    /// Sign the user out; idempotent
    pub async fn execute(&self) {
        if let Err(error) = self.api.logout().await {
            tracing::warn!(error = %error, "Logout call failed; clearing local session anyway");
        }
        self.store.set_anonymous();
        tracing::info!("User signed out");
    }
}
