//! Wallet linker: resolves the bidirectional association between a wallet
//! account and its linked standard trading account, and decides which
//! identifier, currency and badge the header surfaces.
//!
//! Linkage is not stored as a single resolvable key; it is derived from
//! identifier structure (the `VR`/`CR` prefix swap), so resolution must be
//! symmetric: starting from either side reconstructs the same pair.

use serde::{Deserialize, Serialize};

use crate::data::{
    account::Account,
    domain::{AccountId, IconRef, REFERENCE_CURRENCY_LABEL},
};

/// Badge label shown on virtual wallets.
const DEMO_BADGE: &str = "Demo";

/// A resolved wallet / trading-account pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletLink {
    pub wallet_id: AccountId,
    /// Real-side trading account recorded on the wallet.
    pub trading_id: AccountId,
    /// Demo-side trading account recorded on the wallet, when one exists.
    pub demo_id: Option<AccountId>,
    /// Whether the wallet side of the pair is virtual.
    pub is_virtual: bool,
    pub badge: Option<String>,
    pub icon: IconRef,
}

impl WalletLink {
    /// The identifier the header surfaces for a given active account.
    ///
    /// Always the *counterpart's* identifier, never the active account's
    /// own: a virtual active account shows the linked real-side id, a real
    /// active account shows the linked demo-side id. `None` when the
    /// counterpart side is not recorded; callers render a link-less state.
    pub fn displayed_id(&self, active_is_virtual: bool) -> Option<&AccountId> {
        if active_is_virtual {
            Some(&self.trading_id)
        } else {
            self.demo_id.as_ref()
        }
    }

    /// The currency label the header surfaces for a given active account.
    ///
    /// A virtual active account shows the fixed reference-currency label;
    /// a real one shows its own literal currency code.
    pub fn displayed_currency_label(active: &Account) -> String {
        if active.is_virtual {
            REFERENCE_CURRENCY_LABEL.to_string()
        } else {
            active.currency.as_str().to_string()
        }
    }

    fn from_wallet(wallet: &Account, trading_id: AccountId) -> Self {
        let badge = if wallet.is_virtual {
            Some(DEMO_BADGE.to_string())
        } else {
            wallet.settings.landing_company.clone()
        };
        Self {
            wallet_id: wallet.id.clone(),
            trading_id,
            demo_id: wallet.linked_demo_id.clone(),
            is_virtual: wallet.is_virtual,
            badge,
            icon: IconRef::for_account(&wallet.currency, wallet.is_virtual),
        }
    }
}

/// Resolves the wallet link for the active trading account.
///
/// Computes the counterpart identifier by the deterministic prefix swap,
/// then searches `wallets` for the one whose recorded linked trading
/// identifier equals it. No match (or a kind with no counterpart) resolves
/// to `None`.
pub fn resolve_link(active: &Account, wallets: &[Account]) -> Option<WalletLink> {
    let counterpart = active.id.counterpart()?;
    wallets
        .iter()
        .filter(|w| w.is_wallet())
        .find(|w| w.linked_trading_id.as_ref() == Some(&counterpart))
        .map(|wallet| WalletLink::from_wallet(wallet, counterpart))
}

/// Resolves the same pair starting from the wallet side.
///
/// Direct field lookup: the wallet's recorded linked trading identifier is
/// matched against the candidate trading accounts. Symmetric with
/// [`resolve_link`]: both directions identify the same pair of identifiers.
pub fn resolve_link_from_wallet(wallet: &Account, trading: &[Account]) -> Option<WalletLink> {
    if !wallet.is_wallet() {
        return None;
    }
    let linked = wallet.linked_trading_id.as_ref()?;
    trading
        .iter()
        .find(|a| &a.id == linked)
        .map(|account| WalletLink::from_wallet(wallet, account.id.clone()))
}
