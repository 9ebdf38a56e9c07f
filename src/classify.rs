//! Category classifier: partitions the raw account list into display
//! buckets, driven purely by the prefix kind parsed at ingestion.

use itertools::Itertools;
use std::collections::BTreeMap;

use crate::data::{account::Account, domain::Category};

/// Partitions `accounts` into per-category buckets.
///
/// Each account lands in at most one bucket, determined solely by its
/// identifier's prefix kind. Accounts with an unrecognized prefix are
/// dropped, not errored. No deduplication is performed; two accounts with
/// distinct literal identifiers bucket independently even if they describe
/// the same logical identity.
///
/// Pure function: no side effects, safe to recompute on every input change.
pub fn classify(accounts: &[Account]) -> BTreeMap<Category, Vec<&Account>> {
    accounts
        .iter()
        .filter_map(|account| account.kind.category().map(|category| (category, account)))
        .into_group_map()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::domain::AccountKind;

    fn accounts() -> Vec<Account> {
        vec![
            Account::new("VR1001", "USD", true),
            Account::new("CR2002", "EUR", false),
            Account::new("MF2003", "EUR", false),
            Account::wallet("CRW7", "USD", false, "CR2002"),
            Account::new("XX9999", "USD", false),
        ]
    }

    #[test]
    fn buckets_by_prefix_kind() {
        let accounts = accounts();
        let buckets = classify(&accounts);

        assert_eq!(buckets[&Category::Virtual].len(), 1);
        assert_eq!(buckets[&Category::Virtual][0].id.as_str(), "VR1001");
        assert_eq!(buckets[&Category::RealCr][0].id.as_str(), "CR2002");
        assert_eq!(buckets[&Category::RealMf][0].id.as_str(), "MF2003");
        assert_eq!(buckets[&Category::Wallet][0].id.as_str(), "CRW7");
    }

    #[test]
    fn unknown_prefix_lands_in_no_bucket() {
        let accounts = accounts();
        let buckets = classify(&accounts);

        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 4);
        assert!(
            buckets
                .values()
                .flatten()
                .all(|a| a.kind != AccountKind::Unknown)
        );
    }

    #[test]
    fn each_account_in_at_most_one_bucket() {
        let accounts = accounts();
        let buckets = classify(&accounts);

        for account in &accounts {
            let hits = buckets
                .values()
                .flatten()
                .filter(|a| a.id == account.id)
                .count();
            assert!(hits <= 1, "{} appeared {hits} times", account.id);
        }
    }

    #[test]
    fn no_deduplication_of_literal_identifiers() {
        let accounts = vec![
            Account::new("CR2002", "EUR", false),
            Account::new("CR2002", "EUR", false),
        ];
        let buckets = classify(&accounts);
        assert_eq!(buckets[&Category::RealCr].len(), 2);
    }
}
