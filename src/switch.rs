//! Switch coordinator: the protocol that changes which account is active.
//!
//! Modeled as an explicit two-phase commit. Phase 1 persists the
//! credential/identifier pair atomically; phase 2 awaits connection
//! reinitialization and is reported, not rolled back, on failure. A
//! coordinator accepts new requests immediately after either outcome.

mod coordinator;

use serde::{Deserialize, Serialize};

use crate::{data::domain::AccountId, error::SwitchError};

pub use coordinator::SwitchCoordinator;

/// Successful result of a switch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchOutcome {
    /// Target already active: zero side effects.
    NoOp,
    /// The credential pair is persisted, the connection re-established and
    /// the URL synchronized. The caller adopts `active` as the account
    /// store's active identifier.
    Switched { active: AccountId },
}

/// The step of the protocol a failed switch died in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchPhase {
    /// Nothing written: target validation or credential lookup failed.
    Resolve,
    /// The atomic pair write itself failed; stored state is unchanged.
    Persist,
    /// The pair is committed but the live connection did not come back.
    Reconnect,
}

impl SwitchError {
    pub fn phase(&self) -> SwitchPhase {
        match self {
            Self::UnknownAccount(_) | Self::UnknownTarget(_) | Self::InFlight => {
                SwitchPhase::Resolve
            }
            Self::Persist { .. } => SwitchPhase::Persist,
            Self::Reconnect { .. } => SwitchPhase::Reconnect,
        }
    }
}
