use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    data::{account::AccountSnapshot, domain::AccountId},
    error::SwitchError,
    session::ConnectionHandle,
    storage::CredentialStore,
    switch::SwitchOutcome,
    url_state::{UrlBar, account_query_value, with_account_param},
};

/// Orchestrates active-account changes against the persisted credential
/// store, the live connection and the navigable URL.
///
/// Requests are strictly serialized: while one switch is suspended in the
/// reconnect phase, further requests are rejected with
/// [`SwitchError::InFlight`] (no queuing, no cancellation). Once phase 1
/// has committed, the operation proceeds regardless of later UI
/// navigation.
pub struct SwitchCoordinator<S, U> {
    store: Mutex<S>,
    url_bar: Mutex<U>,
    connection: Arc<dyn ConnectionHandle>,
    in_flight: AtomicBool,
}

impl<S, U> SwitchCoordinator<S, U>
where
    S: CredentialStore,
    U: UrlBar,
{
    pub fn new(store: S, url_bar: U, connection: Arc<dyn ConnectionHandle>) -> Self {
        Self {
            store: Mutex::new(store),
            url_bar: Mutex::new(url_bar),
            connection,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Switches the active account to `target`.
    ///
    /// `snapshot` supplies the account list and current active identifier;
    /// on success the caller adopts the returned identifier as active and
    /// re-derives its views.
    #[tracing::instrument(skip(self, snapshot), fields(target = %target))]
    pub async fn switch(
        &self,
        snapshot: &AccountSnapshot,
        target: &AccountId,
    ) -> Result<SwitchOutcome, SwitchError> {
        // 1. No-op: the target is already active. No guard, no side effects.
        if snapshot.active_id.as_ref() == Some(target) {
            debug!("target already active");
            return Ok(SwitchOutcome::NoOp);
        }

        // 2. Serialize: reject while another switch is suspended.
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SwitchError::InFlight)?;

        // 3. Resolve: the target must be a listed account with a stored
        //    credential. A token whose account vanished from the list is
        //    the "inconsistent persisted state" case and rejects the same
        //    way an unknown token does.
        let account = snapshot
            .account(target)
            .ok_or_else(|| SwitchError::UnknownAccount(target.clone()))?
            .clone();
        let token = {
            let store = self.store.lock().await;
            store
                .token_for(target)
                .ok_or_else(|| SwitchError::UnknownTarget(target.clone()))?
        };

        // 4. Phase 1 (commit): persist token and identifier as one pair.
        {
            let mut store = self.store.lock().await;
            store
                .commit_active(target, &token)
                .map_err(|e| SwitchError::Persist {
                    target: target.clone(),
                    msg: e.to_string(),
                })?;
        }

        // 5. Phase 2 (reconnect): the only suspending step. Failure is
        //    reported with the commit already in place.
        if let Err(e) = self.connection.reinitialize(true).await {
            warn!(error = %e, "reconnect failed after commit");
            return Err(SwitchError::Reconnect {
                target: target.clone(),
                msg: e.to_string(),
            });
        }

        // 6. URL sync: replace the `account` parameter without a history
        //    entry. Virtual targets carry their currency code, real targets
        //    the fixed "demo" literal.
        {
            let mut url_bar = self.url_bar.lock().await;
            let value = account_query_value(&account);
            let next = with_account_param(&url_bar.current(), &value);
            url_bar.replace_query(next);
        }

        debug!("switch committed");
        Ok(SwitchOutcome::Switched {
            active: target.clone(),
        })
    }

    /// Read access to the underlying store, for callers that own the
    /// coordinator and need to inspect persisted state.
    pub async fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let store = self.store.lock().await;
        f(&store)
    }

    /// Read access to the current navigable URL.
    pub async fn current_url(&self) -> url::Url {
        self.url_bar.lock().await.current()
    }
}

/// RAII in-flight marker; released on drop whatever the outcome.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
