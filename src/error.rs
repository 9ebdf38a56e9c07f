use thiserror::Error;

use crate::data::domain::AccountId;

pub type SwitchdeckResult<T> = Result<T, SwitchdeckError>;

#[derive(Debug, Error)]
pub enum SwitchdeckError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Switch(#[from] SwitchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// Errors related to account ingestion and domain parsing.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Empty account identifier")]
    EmptyAccountId,
}

/// Errors raised while changing the active account.
///
/// The rejection variants and `Persist` occur before any state is written;
/// `Reconnect` occurs after the credential pair has been committed and is
/// NOT rolled back.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("Target account '{0}' is not in the account list")]
    UnknownAccount(AccountId),

    #[error("No stored credential for target account '{0}'")]
    UnknownTarget(AccountId),

    #[error("A switch is already in flight")]
    InFlight,

    #[error("Failed to persist credential pair for '{target}': {msg}")]
    Persist { target: AccountId, msg: String },

    #[error("Credentials committed for '{target}' but reconnect failed: {msg}")]
    Reconnect { target: AccountId, msg: String },
}

impl SwitchError {
    /// True when the credential pair was already persisted before the
    /// failure, i.e. the client is switched but not (yet) reconnected.
    pub fn committed(&self) -> bool {
        matches!(self, Self::Reconnect { .. })
    }
}

/// Errors related to the persisted credential store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO operation failed")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed")]
    Json(#[from] serde_json::Error),

    #[error("Credential document is inconsistent: {0}")]
    Inconsistent(String),
}

/// Errors surfaced by the live-connection collaborator.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Connection reinitialization failed: {0}")]
    Reinit(String),

    #[error("Logout failed: {0}")]
    Logout(String),
}
