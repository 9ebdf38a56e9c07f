//! URL-state synchronization: the single `account` query parameter that
//! mirrors the active account in the navigable URL.

use url::Url;

use crate::data::account::Account;

/// Query parameter name owned by this engine.
pub const ACCOUNT_PARAM: &str = "account";

/// Fixed token used when switching to a real account.
pub const DEMO_PARAM_VALUE: &str = "demo";

/// The `account` parameter value for a switch target.
///
/// A virtual target carries its own currency code; a real target carries
/// the fixed literal `"demo"`. The asymmetry is intentional and load-
/// bearing for deep links; do not normalize it.
pub fn account_query_value(account: &Account) -> String {
    if account.is_virtual {
        account.currency.as_str().to_string()
    } else {
        DEMO_PARAM_VALUE.to_string()
    }
}

/// Returns `url` with the `account` parameter set to `value`, preserving
/// every other query pair and their order.
pub fn with_account_param(url: &Url, value: &str) -> Url {
    let mut out = url.clone();
    let mut replaced = false;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == ACCOUNT_PARAM {
                replaced = true;
                (k.into_owned(), value.to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    {
        let mut qp = out.query_pairs_mut();
        qp.clear();
        qp.extend_pairs(pairs);
        if !replaced {
            qp.append_pair(ACCOUNT_PARAM, value);
        }
    }
    out
}

/// Abstract navigable-URL holder.
///
/// `replace_query` must swap the current URL without adding a history
/// entry; the presentation layer supplies the real implementation.
pub trait UrlBar: Send {
    fn current(&self) -> Url;
    fn replace_query(&mut self, url: Url);
}

/// In-memory [`UrlBar`] for tests and headless use.
#[derive(Debug, Clone)]
pub struct MemoryUrlBar {
    url: Url,
}

impl MemoryUrlBar {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

impl UrlBar for MemoryUrlBar {
    fn current(&self) -> Url {
        self.url.clone()
    }

    fn replace_query(&mut self, url: Url) {
        self.url = url;
    }
}
