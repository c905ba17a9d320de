//! Session Store
//!
//! Single source of truth for "is there a usable authenticated identity
//! right now". State lives in a watch channel so the rendering layer
//! subscribes to changes instead of polling; mutation happens only
//! through the narrow API consumed by the use cases.
//!
//! A generation counter guards against raced completions: every
//! mutation bumps it, and a pending bootstrap result is discarded when
//! the generation moved since the check started (view teardown, or a
//! faster concurrent sign-in). The counter is only touched while the
//! watch channel's modify lock is held, so the staleness check and the
//! state write are one atomic step even across runtime threads.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::domain::entity::{Identity, MfaChallenge};
use crate::dto::MfaWarningPayload;

/// Non-blocking advisory about an approaching MFA grace-period deadline
#[derive(Debug, Clone, PartialEq)]
pub struct MfaWarning {
    pub message: String,
    pub grace_ends_at: DateTime<Utc>,
    pub days_remaining: i64,
}

impl From<MfaWarningPayload> for MfaWarning {
    fn from(payload: MfaWarningPayload) -> Self {
        Self {
            message: payload.message,
            grace_ends_at: payload.grace_ends_at,
            days_remaining: payload.days_remaining,
        }
    }
}

/// Session state machine
///
/// A tagged union instead of `loading`/`user`/`mfaToken` flags: a
/// challenge can never coexist with an identity, and "loading with a
/// user" is unrepresentable.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Initial identity check in flight
    #[default]
    Validating,
    /// No usable identity
    Anonymous,
    /// Password accepted; second factor outstanding
    MfaPending { challenge: MfaChallenge },
    /// Backend-confirmed identity satisfying the access policy
    Authenticated {
        identity: Identity,
        mfa_warning: Option<MfaWarning>,
    },
}

impl SessionState {
    pub fn is_validating(&self) -> bool {
        matches!(self, SessionState::Validating)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated { identity, .. } => Some(identity),
            _ => None,
        }
    }

    pub fn challenge(&self) -> Option<&MfaChallenge> {
        match self {
            SessionState::MfaPending { challenge } => Some(challenge),
            _ => None,
        }
    }

    pub fn mfa_warning(&self) -> Option<&MfaWarning> {
        match self {
            SessionState::Authenticated { mfa_warning, .. } => mfa_warning.as_ref(),
            _ => None,
        }
    }
}

/// Process-wide session store
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    /// Runs between the staleness check and the state write in
    /// `finish_validation`; lets tests hold the commit window open.
    #[cfg(test)]
    commit_hook: std::sync::Mutex<Option<Box<dyn Fn() + Send>>>,
}

impl SessionStore {
    /// Create a store in the `Validating` state
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(SessionState::Validating),
            generation: AtomicU64::new(0),
            #[cfg(test)]
            commit_hook: std::sync::Mutex::new(None),
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Current generation; captured by the bootstrap check before its
    /// network call. A bump landing after this load is caught by the
    /// in-lock comparison in `finish_validation`.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Bump the generation and apply a state change as one step under
    /// the channel's modify lock
    fn mutate(&self, apply: impl FnOnce(&mut SessionState)) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            apply(state);
        });
    }

    pub(crate) fn set_authenticated(&self, identity: Identity, mfa_warning: Option<MfaWarning>) {
        tracing::debug!(user_id = %identity.id, "Session authenticated");
        self.mutate(|state| {
            *state = SessionState::Authenticated {
                identity,
                mfa_warning,
            };
        });
    }

    pub(crate) fn set_anonymous(&self) {
        self.mutate(|state| *state = SessionState::Anonymous);
    }

    pub(crate) fn set_mfa_pending(&self, challenge: MfaChallenge) {
        self.mutate(|state| *state = SessionState::MfaPending { challenge });
    }

    /// Discard a pending challenge without side effects
    pub(crate) fn cancel_mfa(&self) {
        self.state.send_if_modified(|state| {
            if matches!(state, SessionState::MfaPending { .. }) {
                self.generation.fetch_add(1, Ordering::AcqRel);
                *state = SessionState::Anonymous;
                true
            } else {
                false
            }
        });
    }

    /// Apply the result of the initial identity check
    ///
    /// Returns false (and applies nothing) when the generation moved
    /// since `started_generation` was captured: a completed sign-in or
    /// a teardown must not be overwritten by a stale check. The check
    /// and the write happen inside one `send_if_modified` closure, so a
    /// mutation on another thread either lands before the check (and
    /// this result is discarded) or waits until after the write.
    pub(crate) fn finish_validation(
        &self,
        started_generation: u64,
        outcome: Option<(Identity, Option<MfaWarning>)>,
    ) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::Acquire) != started_generation {
                return false;
            }
            #[cfg(test)]
            self.run_commit_hook();
            self.generation.fetch_add(1, Ordering::AcqRel);
            *state = match outcome {
                Some((identity, mfa_warning)) => {
                    tracing::debug!(user_id = %identity.id, "Session authenticated");
                    SessionState::Authenticated {
                        identity,
                        mfa_warning,
                    }
                }
                None => SessionState::Anonymous,
            };
            applied = true;
            true
        });
        applied
    }

    #[cfg(test)]
    fn run_commit_hook(&self) {
        if let Some(hook) = self.commit_hook.lock().unwrap().as_ref() {
            hook();
        }
    }

    /// Invalidate any in-flight check; called when the owning view is
    /// torn down. Advisory only: the network call is not cancelled, its
    /// result is simply discarded. The bump takes the modify lock so it
    /// cannot land inside a validation commit.
    pub fn invalidate_pending(&self) {
        self.state.send_if_modified(|_| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            false
        });
    }

    /// Clear the grace-period advisory. Purely local, no network call,
    /// and no generation bump: nothing that races on the counter can
    /// be pending while the state is `Authenticated`.
    pub fn dismiss_mfa_warning(&self) {
        self.state.send_modify(|state| {
            if let SessionState::Authenticated { mfa_warning, .. } = state {
                *mfa_warning = None;
            }
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
