use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Notify;
use url::Url;

use switchdeck::{
    Account, AccountId, AccountSnapshot, BalanceSnapshot, ConnectionError, ConnectionHandle,
    MemoryCredentialStore, MemoryUrlBar, SwitchCoordinator, Token,
};

/// Live-connection double that counts reinit calls. It can be primed to
/// fail the reconnect phase, or gated so a test controls exactly when the
/// suspended reconnect resumes.
pub struct FakeConnection {
    pub reinit_calls: AtomicUsize,
    pub fail_reinit: bool,
    gate: Option<Arc<Notify>>,
}

impl FakeConnection {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            reinit_calls: AtomicUsize::new(0),
            fail_reinit: false,
            gate: None,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reinit_calls: AtomicUsize::new(0),
            fail_reinit: true,
            gate: None,
        })
    }

    /// Reconnects suspend until the test fires `gate.notify_one()`.
    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            reinit_calls: AtomicUsize::new(0),
            fail_reinit: false,
            gate: Some(gate),
        })
    }
}

#[async_trait]
impl ConnectionHandle for FakeConnection {
    async fn reinitialize(&self, force_reauth: bool) -> Result<(), ConnectionError> {
        assert!(force_reauth, "switching always forces re-authentication");
        self.reinit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail_reinit {
            Err(ConnectionError::Reinit("socket closed".into()))
        } else {
            Ok(())
        }
    }

    async fn logout(&self) -> Result<(), ConnectionError> {
        Ok(())
    }
}

/// Installs a fmt subscriber once per test binary; repeated calls no-op.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn snapshot() -> AccountSnapshot {
    let accounts = vec![
        Account::new("VR1001", "USD", true),
        Account::new("CR2002", "EUR", false),
        Account::new("MF2003", "EUR", false),
    ];
    let balances = BalanceSnapshot::new(Utc::now())
        .with("VR1001", Decimal::new(1_000_000, 2), "USD")
        .with("CR2002", Decimal::new(51_230, 2), "EUR");
    AccountSnapshot::new(accounts, balances, Some(AccountId::new("VR1001")))
}

pub fn seeded_store() -> MemoryCredentialStore {
    use switchdeck::CredentialStore;

    let mut store = MemoryCredentialStore::new();
    store
        .put_token(AccountId::new("VR1001"), Token::new("t-vr"))
        .unwrap();
    store
        .put_token(AccountId::new("CR2002"), Token::new("t-cr"))
        .unwrap();
    store
        .commit_active(&AccountId::new("VR1001"), &Token::new("t-vr"))
        .unwrap();
    store
}

pub fn url_bar() -> MemoryUrlBar {
    MemoryUrlBar::new(Url::parse("https://app.example.com/bot?lang=en&account=USD").unwrap())
}

pub fn coordinator(
    store: MemoryCredentialStore,
    connection: Arc<FakeConnection>,
) -> SwitchCoordinator<MemoryCredentialStore, MemoryUrlBar> {
    SwitchCoordinator::new(store, url_bar(), connection)
}
