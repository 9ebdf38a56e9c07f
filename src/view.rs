//! View projector: maps raw accounts plus the live balance snapshot into
//! the per-account display records consumed by the presentation layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    classify::classify,
    data::{
        account::{Account, AccountSnapshot, BalanceSnapshot},
        domain::{
            AccountId, Category, CurrencyCode, IconRef, REFERENCE_CURRENCY,
            REFERENCE_CURRENCY_LABEL,
        },
    },
    format::format_balance,
};

/// Fixed amount rendered for a real account whose entry is missing from the
/// live balance snapshot (degraded / not-yet-streamed state). This is an
/// explicit display policy, not a silent default.
pub const REAL_BALANCE_FALLBACK: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

// ================================================================================================
// Display Record
// ================================================================================================

/// One row of the account switcher, fully resolved for rendering.
///
/// Ephemeral: recomputed from an [`AccountSnapshot`] on every relevant input
/// change, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub display_id: AccountId,
    pub currency_label: String,
    pub formatted_balance: String,
    pub icon: IconRef,
    pub is_active: bool,
    pub is_virtual: bool,
    pub is_disabled: bool,
}

/// Projects a single account into its display record.
///
/// Pure and idempotent over its inputs. An absent account passes through as
/// `None` so the presentation layer stays total during partial loading.
///
/// Rules:
/// - Virtual accounts carry the fixed reference-currency label
///   ([`REFERENCE_CURRENCY_LABEL`]) because they are denominated in the
///   house currency for display; real accounts carry their literal code.
/// - Virtual balances read the live snapshot (missing entry renders as
///   zero). Real balances read the live snapshot and fall back to
///   [`REAL_BALANCE_FALLBACK`] when no entry exists yet.
/// - `is_active` iff the identifier equals `active_id`.
pub fn project(
    account: Option<&Account>,
    balances: &BalanceSnapshot,
    active_id: Option<&AccountId>,
) -> Option<DisplayRecord> {
    let account = account?;

    let live = balances.get(&account.id).map(|entry| entry.balance);
    let balance = if account.is_virtual {
        live.unwrap_or(Decimal::ZERO)
    } else {
        live.unwrap_or_else(|| {
            debug!(account = %account.id, "no live balance entry, rendering fallback amount");
            REAL_BALANCE_FALLBACK
        })
    };

    let (currency_label, precision_currency) = if account.is_virtual {
        (
            REFERENCE_CURRENCY_LABEL.to_string(),
            CurrencyCode::new(REFERENCE_CURRENCY),
        )
    } else {
        (account.currency.as_str().to_string(), account.currency.clone())
    };

    Some(DisplayRecord {
        display_id: account.id.clone(),
        currency_label,
        formatted_balance: format_balance(balance, &precision_currency),
        icon: IconRef::for_account(&account.currency, account.is_virtual),
        is_active: active_id == Some(&account.id),
        is_virtual: account.is_virtual,
        is_disabled: account.is_disabled,
    })
}

/// Derives all per-category record lists from one immutable snapshot.
///
/// Classification and projection in a single pass; the one-active invariant
/// holds across the result: at most one record is active, and exactly one
/// when `snapshot.active_id` names a listed account.
pub fn project_all(snapshot: &AccountSnapshot) -> BTreeMap<Category, Vec<DisplayRecord>> {
    classify(&snapshot.accounts)
        .into_iter()
        .map(|(category, accounts)| {
            let records = accounts
                .into_iter()
                .filter_map(|account| {
                    project(Some(account), &snapshot.balances, snapshot.active_id.as_ref())
                })
                .collect();
            (category, records)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn snapshot() -> AccountSnapshot {
        let accounts = vec![
            Account::new("VR1001", "USD", true),
            Account::new("CR2002", "EUR", false),
        ];
        let balances = BalanceSnapshot::new(Utc::now())
            .with("VR1001", Decimal::from_str("10000.00").unwrap(), "USD")
            .with("CR2002", Decimal::from_str("512.3").unwrap(), "EUR");
        AccountSnapshot::new(accounts, balances, Some(AccountId::new("VR1001")))
    }

    #[test]
    fn virtual_account_projects_reference_label() {
        let snap = snapshot();
        let record = project(snap.account(&"VR1001".into()), &snap.balances, snap.active_id.as_ref())
            .unwrap();

        assert_eq!(record.currency_label, "US Dollar");
        assert_eq!(record.formatted_balance, "10,000.00");
        assert_eq!(record.icon, IconRef::Virtual);
        assert!(record.is_active);
        assert!(record.is_virtual);
    }

    #[test]
    fn real_account_projects_literal_currency() {
        let snap = snapshot();
        let record = project(snap.account(&"CR2002".into()), &snap.balances, snap.active_id.as_ref())
            .unwrap();

        assert_eq!(record.currency_label, "EUR");
        assert_eq!(record.formatted_balance, "512.30");
        assert_eq!(record.icon, IconRef::Eur);
        assert!(!record.is_active);
        assert!(!record.is_virtual);
    }

    #[test]
    fn real_account_without_live_balance_renders_fallback() {
        let accounts = vec![Account::new("CR2002", "USD", false).disabled()];
        let snap = AccountSnapshot::new(accounts, BalanceSnapshot::default(), None);
        let record = project(snap.account(&"CR2002".into()), &snap.balances, None).unwrap();

        assert_eq!(record.formatted_balance, "10,000.00");
        assert!(!record.is_active);
        assert!(record.is_disabled);
    }

    #[test]
    fn virtual_account_without_live_balance_renders_zero() {
        let accounts = vec![Account::new("VR1001", "USD", true)];
        let snap = AccountSnapshot::new(accounts, BalanceSnapshot::default(), None);
        let record = project(snap.account(&"VR1001".into()), &snap.balances, None).unwrap();

        assert_eq!(record.formatted_balance, "0.00");
    }

    #[test]
    fn absent_account_passes_through() {
        let snap = snapshot();
        assert!(project(None, &snap.balances, snap.active_id.as_ref()).is_none());
    }

    #[test]
    fn projection_is_idempotent() {
        let snap = snapshot();
        let account = snap.account(&"CR2002".into());
        let first = project(account, &snap.balances, snap.active_id.as_ref());
        let second = project(account, &snap.balances, snap.active_id.as_ref());
        assert_eq!(first, second);
    }

    #[test]
    fn exactly_one_active_record_when_active_listed() {
        let snap = snapshot();
        let by_category = project_all(&snap);

        let active: Vec<_> = by_category
            .values()
            .flatten()
            .filter(|r| r.is_active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].display_id.as_str(), "VR1001");
    }

    #[test]
    fn zero_active_records_when_active_unlisted() {
        let mut snap = snapshot();
        snap.active_id = Some(AccountId::new("CR9999"));
        let by_category = project_all(&snap);

        assert!(by_category.values().flatten().all(|r| !r.is_active));
    }

    #[test]
    fn classification_scenario_matches_projection() {
        let snap = snapshot();
        let by_category = project_all(&snap);

        assert_eq!(by_category[&Category::Virtual].len(), 1);
        assert_eq!(by_category[&Category::RealCr].len(), 1);
        assert_eq!(
            by_category[&Category::Virtual][0].display_id.as_str(),
            "VR1001"
        );
    }
}
