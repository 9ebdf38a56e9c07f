use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, IntoStaticStr};
use strum_macros::EnumString;

use crate::error::{DataError, SwitchdeckError};

// ================================================================================================
// Domain Strong Types (NewTypes)
// ================================================================================================

/// Represents a raw account identifier (e.g. `"VRTC6913737"`, `"CR4599918"`).
///
/// The identifier's structural prefix encodes the account kind. The prefix is
/// parsed exactly once at ingestion (see [`AccountKind::parse`]); downstream
/// logic switches on the resulting variant, never on substrings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> AccountKind {
        AccountKind::parse(&self.0)
    }

    /// Computes the linked-side identifier by swapping the virtual prefix
    /// for the real prefix (or vice versa), keeping the numeric tail.
    ///
    /// `"VR..."` becomes `"CR..."` and `"CR..."` becomes `"VR..."`. Kinds
    /// without a counterpart (`MF`, unknown prefixes) yield `None`.
    pub fn counterpart(&self) -> Option<AccountId> {
        match self.kind() {
            AccountKind::Virtual => Some(Self(format!("CR{}", &self.0[2..]))),
            AccountKind::RealCr => Some(Self(format!("VR{}", &self.0[2..]))),
            AccountKind::Wallet if self.0.starts_with("VRW") => {
                Some(Self(format!("CRW{}", &self.0[3..])))
            }
            AccountKind::Wallet => Some(Self(format!("VRW{}", &self.0[3..]))),
            AccountKind::RealMf | AccountKind::Unknown => None,
        }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Represents an ISO-4217-style currency code (e.g. `"USD"`, `"BTC"`).
///
/// Codes are normalized to uppercase on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Standard minor-unit count used for balance rendering.
    ///
    /// Unknown codes default to 2 rather than erroring; display formatting
    /// must stay total under partial data.
    pub fn decimal_places(&self) -> u32 {
        match self.0.as_str() {
            "JPY" | "KRW" | "VND" => 0,
            "BTC" | "ETH" | "LTC" | "ETC" => 8,
            _ => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The house reference currency virtual accounts are denominated in.
pub const REFERENCE_CURRENCY: &str = "USD";

/// The long-form label projected for virtual accounts instead of their
/// literal currency code.
pub const REFERENCE_CURRENCY_LABEL: &str = "US Dollar";

/// An opaque authentication token stored in the persisted credential map.
///
/// `Debug` output is redacted so tokens never leak through tracing.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(***)")
    }
}

// ================================================================================================
// Closed Enumerations
// ================================================================================================

/// The structural kind encoded in an account identifier's prefix.
///
/// The prefix set is closed and mutually exclusive by construction; wallet
/// prefixes are checked before their trading-account prefixes (`VRW` before
/// `VR`, `CRW` before `CR`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AccountKind {
    /// Simulated-funds trading account (`VR` prefix).
    Virtual,
    /// Real-money trading account under the offshore company (`CR` prefix).
    RealCr,
    /// Real-money trading account under the financial company (`MF` prefix).
    RealMf,
    /// Wallet account (`CRW`/`VRW` prefix).
    Wallet,
    /// Unrecognized prefix. Excluded from every category bucket.
    Unknown,
}

impl AccountKind {
    pub fn parse(id: &str) -> Self {
        if id.starts_with("CRW") || id.starts_with("VRW") {
            Self::Wallet
        } else if id.starts_with("VR") {
            Self::Virtual
        } else if id.starts_with("CR") {
            Self::RealCr
        } else if id.starts_with("MF") {
            Self::RealMf
        } else {
            Self::Unknown
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Virtual => Some(Category::Virtual),
            Self::RealCr => Some(Category::RealCr),
            Self::RealMf => Some(Category::RealMf),
            Self::Wallet => Some(Category::Wallet),
            Self::Unknown => None,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Self::RealCr | Self::RealMf)
    }
}

/// A display bucket produced by the category classifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Virtual,
    RealCr,
    RealMf,
    Wallet,
}

/// Selector for the icon asset shown next to an account entry.
///
/// Derived from the (currency, virtual-flag) pair. Unknown currencies fall
/// back to [`IconRef::Generic`], never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum IconRef {
    /// The demo-badged reference-currency icon used for every virtual account.
    Virtual,
    Usd,
    Eur,
    Gbp,
    Aud,
    Jpy,
    Btc,
    Eth,
    Usdt,
    Usdc,
    Generic,
}

impl IconRef {
    pub fn for_account(currency: &CurrencyCode, is_virtual: bool) -> Self {
        if is_virtual {
            return Self::Virtual;
        }
        match currency.as_str() {
            "USD" => Self::Usd,
            "EUR" => Self::Eur,
            "GBP" => Self::Gbp,
            "AUD" => Self::Aud,
            "JPY" => Self::Jpy,
            "BTC" => Self::Btc,
            "ETH" => Self::Eth,
            "USDT" => Self::Usdt,
            "USDC" => Self::Usdc,
            _ => Self::Generic,
        }
    }
}

/// Validates a raw identifier before ingestion.
///
/// Only emptiness is rejected here; unrecognized prefixes are legal and
/// simply classify as [`AccountKind::Unknown`].
pub fn validate_account_id(raw: &str) -> Result<AccountId, SwitchdeckError> {
    if raw.trim().is_empty() {
        return Err(DataError::EmptyAccountId.into());
    }
    Ok(AccountId::new(raw))
}
