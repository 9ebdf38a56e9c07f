//! Persisted credential map: identifier -> opaque token, plus the active
//! identifier/token pair.
//!
//! The pair must never diverge; both stores commit it in one step (the
//! file-backed store replaces the whole document atomically, so a crash
//! leaves the previous document authoritative).

use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{
    data::domain::{AccountId, Token},
    error::StorageError,
};

/// The serialized credential document.
///
/// Flat string-keyed map with no versioning; losing it forces
/// re-authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersistedCredentials {
    pub tokens: HashMap<AccountId, Token>,
    pub active_id: Option<AccountId>,
    pub active_token: Option<Token>,
}

impl PersistedCredentials {
    /// Opportunistic consistency check: the recorded active identifier must
    /// have a token entry. An inconsistent document is treated by callers
    /// as "no credential" on the next switch attempt, never as fatal.
    pub fn is_consistent(&self) -> bool {
        match (&self.active_id, &self.active_token) {
            (Some(id), Some(_)) => self.tokens.contains_key(id),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Abstract persisted credential storage.
///
/// Written once per login (`put_token`), read on every switch
/// (`token_for`); `commit_active` is the only mutation the switching engine
/// performs and must land both fields of the pair together.
pub trait CredentialStore: Send {
    fn token_for(&self, id: &AccountId) -> Option<Token>;

    fn active(&self) -> Option<(AccountId, Token)>;

    /// Stores a token for an account (login-time population).
    fn put_token(&mut self, id: AccountId, token: Token) -> Result<(), StorageError>;

    /// Atomically records `id`/`token` as the active pair.
    fn commit_active(&mut self, id: &AccountId, token: &Token) -> Result<(), StorageError>;
}

// ================================================================================================
// In-Memory Store
// ================================================================================================

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    doc: PersistedCredentials,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &PersistedCredentials {
        &self.doc
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token_for(&self, id: &AccountId) -> Option<Token> {
        self.doc.tokens.get(id).cloned()
    }

    fn active(&self) -> Option<(AccountId, Token)> {
        self.doc
            .active_id
            .clone()
            .zip(self.doc.active_token.clone())
    }

    fn put_token(&mut self, id: AccountId, token: Token) -> Result<(), StorageError> {
        self.doc.tokens.insert(id, token);
        Ok(())
    }

    fn commit_active(&mut self, id: &AccountId, token: &Token) -> Result<(), StorageError> {
        self.doc.active_id = Some(id.clone());
        self.doc.active_token = Some(token.clone());
        Ok(())
    }
}

// ================================================================================================
// JSON File Store
// ================================================================================================

/// File-backed store holding the whole credential document as one JSON
/// file. Every write serializes the full document to a sibling temp file
/// and renames it over the target, so the identifier/token pair can never
/// be observed half-written.
#[derive(Debug)]
pub struct JsonFileCredentialStore {
    path: PathBuf,
    doc: PersistedCredentials,
}

impl JsonFileCredentialStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let doc = match fs::read_to_string(&path) {
            Ok(raw) => {
                let doc: PersistedCredentials = serde_json::from_str(&raw)?;
                if !doc.is_consistent() {
                    warn!(path = %path.display(), "credential document inconsistent, active pair will be re-resolved");
                }
                doc
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PersistedCredentials::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, doc })
    }

    pub fn document(&self) -> &PersistedCredentials {
        &self.doc
    }

    fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStore for JsonFileCredentialStore {
    fn token_for(&self, id: &AccountId) -> Option<Token> {
        self.doc.tokens.get(id).cloned()
    }

    fn active(&self) -> Option<(AccountId, Token)> {
        self.doc
            .active_id
            .clone()
            .zip(self.doc.active_token.clone())
    }

    fn put_token(&mut self, id: AccountId, token: Token) -> Result<(), StorageError> {
        self.doc.tokens.insert(id, token);
        self.persist()
    }

    fn commit_active(&mut self, id: &AccountId, token: &Token) -> Result<(), StorageError> {
        let previous = (self.doc.active_id.take(), self.doc.active_token.take());
        self.doc.active_id = Some(id.clone());
        self.doc.active_token = Some(token.clone());
        if let Err(e) = self.persist() {
            // Keep the in-memory view aligned with what is actually on disk.
            (self.doc.active_id, self.doc.active_token) = previous;
            return Err(e);
        }
        Ok(())
    }
}
