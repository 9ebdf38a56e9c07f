mod classify;
mod data;
mod error;
mod format;
mod session;
mod storage;
mod switch;
mod url_state;
mod view;
mod wallet;

pub use classify::classify;
pub use data::account::{
    Account, AccountBalance, AccountCategory, AccountSettings, AccountSnapshot, BalanceSnapshot,
};
pub use data::domain::{
    AccountId, AccountKind, Category, CurrencyCode, IconRef, REFERENCE_CURRENCY,
    REFERENCE_CURRENCY_LABEL, Token, validate_account_id,
};
pub use error::{
    ConnectionError, DataError, StorageError, SwitchError, SwitchdeckError, SwitchdeckResult,
};
pub use format::{format_amount, format_balance};
pub use session::{ConnectionHandle, is_low_risk_country};
pub use storage::{
    CredentialStore, JsonFileCredentialStore, MemoryCredentialStore, PersistedCredentials,
};
pub use switch::{SwitchCoordinator, SwitchOutcome, SwitchPhase};
pub use url_state::{
    ACCOUNT_PARAM, DEMO_PARAM_VALUE, MemoryUrlBar, UrlBar, account_query_value, with_account_param,
};
pub use view::{DisplayRecord, REAL_BALANCE_FALLBACK, project, project_all};
pub use wallet::{WalletLink, resolve_link, resolve_link_from_wallet};
