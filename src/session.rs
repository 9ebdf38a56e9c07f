//! Abstract collaborator capabilities the engine requires from the session
//! layer, plus the residence-based risk policy flag exposed to the UI.

use async_trait::async_trait;

use crate::error::ConnectionError;

/// Handle to the live trading connection.
///
/// `reinitialize` is the only suspending step of an account switch; it is
/// awaited after the credential pair has been committed.
#[async_trait]
pub trait ConnectionHandle: Send + Sync {
    /// Tears down and re-establishes the live connection, optionally
    /// forcing re-authentication with the freshly persisted token.
    async fn reinitialize(&self, force_reauth: bool) -> Result<(), ConnectionError>;

    /// Ends the session. Invoked by the presentation layer, not by the
    /// switch flow.
    async fn logout(&self) -> Result<(), ConnectionError>;
}

/// Residence countries whose accounts get the relaxed ("low-risk") real
/// account presentation. Closed lowercase table; the engine only exposes
/// the flag, the UI decides what to do with it.
const LOW_RISK_COUNTRIES: &[&str] = &[
    "at", "au", "be", "bg", "cy", "cz", "de", "dk", "ee", "es", "fi", "fr", "gb", "gr", "hr",
    "hu", "ie", "it", "lt", "lu", "lv", "mt", "nl", "nz", "pl", "pt", "ro", "se", "sg", "si",
    "sk",
];

/// True when `country_code` (case-insensitive) is in the low-risk table.
/// Absent or unknown codes are not low-risk.
pub fn is_low_risk_country(country_code: Option<&str>) -> bool {
    country_code
        .map(|code| LOW_RISK_COUNTRIES.contains(&code.to_lowercase().as_str()))
        .unwrap_or(false)
}
