use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::domain::{AccountId, AccountKind, CurrencyCode};

// ================================================================================================
// Raw Account Data
// ================================================================================================

/// Whether an account is a standard trading account or a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    #[default]
    Trading,
    Wallet,
}

/// Opaque per-account settings bag.
///
/// Only the fields this engine reads are modeled; the store may carry more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccountSettings {
    /// Two-letter lowercase residence country code, when known.
    pub country_code: Option<String>,
    /// Landing-company label shown on real-wallet badges.
    pub landing_company: Option<String>,
}

/// A raw account as held by the account store.
///
/// The identifier's kind is parsed exactly once in [`Account::new`] and
/// carried alongside the id; nothing downstream re-inspects the string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub kind: AccountKind,
    pub currency: CurrencyCode,
    pub is_virtual: bool,
    pub category: AccountCategory,
    pub is_disabled: bool,
    pub settings: AccountSettings,
    /// For wallet accounts: the recorded trading account on the wallet's own
    /// side (a real wallet records the `CR` id, a demo wallet the `VR` id).
    pub linked_trading_id: Option<AccountId>,
    /// For wallet accounts: the recorded linked demo trading account.
    pub linked_demo_id: Option<AccountId>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, currency: impl Into<CurrencyCode>, is_virtual: bool) -> Self {
        let id = id.into();
        let kind = id.kind();
        Self {
            id,
            kind,
            currency: currency.into(),
            is_virtual,
            category: AccountCategory::Trading,
            is_disabled: false,
            settings: AccountSettings::default(),
            linked_trading_id: None,
            linked_demo_id: None,
        }
    }

    pub fn wallet(
        id: impl Into<AccountId>,
        currency: impl Into<CurrencyCode>,
        is_virtual: bool,
        linked_trading_id: impl Into<AccountId>,
    ) -> Self {
        let mut account = Self::new(id, currency, is_virtual);
        account.category = AccountCategory::Wallet;
        account.linked_trading_id = Some(linked_trading_id.into());
        account
    }

    pub fn with_country(mut self, code: impl Into<String>) -> Self {
        self.settings.country_code = Some(code.into());
        self
    }

    pub fn with_landing_company(mut self, label: impl Into<String>) -> Self {
        self.settings.landing_company = Some(label.into());
        self
    }

    pub fn with_linked_demo(mut self, id: impl Into<AccountId>) -> Self {
        self.linked_demo_id = Some(id.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_disabled = true;
        self
    }

    pub fn is_wallet(&self) -> bool {
        self.category == AccountCategory::Wallet
    }
}

// ================================================================================================
// Live Balance Data
// ================================================================================================

/// One entry of the live all-accounts balance feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub balance: Decimal,
    pub currency: CurrencyCode,
}

impl AccountBalance {
    pub fn new(balance: Decimal, currency: impl Into<CurrencyCode>) -> Self {
        Self {
            balance,
            currency: currency.into(),
        }
    }
}

/// Snapshot of the asynchronously refreshed balance feed.
///
/// Read-only to this engine; a missing entry is a degraded state, not an
/// error (see the projector's fallback rules).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    balances: HashMap<AccountId, AccountBalance>,
    pub fetched_at: DateTime<Utc>,
}

impl BalanceSnapshot {
    pub fn new(fetched_at: DateTime<Utc>) -> Self {
        Self {
            balances: HashMap::new(),
            fetched_at,
        }
    }

    pub fn with(
        mut self,
        id: impl Into<AccountId>,
        balance: Decimal,
        currency: impl Into<CurrencyCode>,
    ) -> Self {
        self.insert(id.into(), AccountBalance::new(balance, currency));
        self
    }

    pub fn insert(&mut self, id: AccountId, balance: AccountBalance) {
        self.balances.insert(id, balance);
    }

    pub fn get(&self, id: &AccountId) -> Option<&AccountBalance> {
        self.balances.get(id)
    }
}

impl Default for BalanceSnapshot {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::MIN_UTC)
    }
}

// ================================================================================================
// Projection Input
// ================================================================================================

/// Immutable input to every derivation pass.
///
/// The caller assembles a snapshot from its stores and decides when to
/// recompute; the engine keeps no global mutable state and no implicit
/// re-derivation triggers.
#[derive(Debug, Clone, Default)]
pub struct AccountSnapshot {
    pub accounts: Vec<Account>,
    pub balances: BalanceSnapshot,
    pub active_id: Option<AccountId>,
}

impl AccountSnapshot {
    pub fn new(accounts: Vec<Account>, balances: BalanceSnapshot, active_id: Option<AccountId>) -> Self {
        Self {
            accounts,
            balances,
            active_id,
        }
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    pub fn active_account(&self) -> Option<&Account> {
        self.active_id.as_ref().and_then(|id| self.account(id))
    }

    /// True when any account in the list is wallet-category, which routes
    /// the presentation layer to the wallet header variant.
    pub fn has_wallet(&self) -> bool {
        self.accounts.iter().any(Account::is_wallet)
    }
}
