//! Lookup state machine.
//!
//! `Idle` only exists before the first search. Every accepted search moves to
//! `Loading`, which always settles into `Success` or `Failed`.

use crate::error::LookupError;
use crate::types::LookupReport;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Success(LookupReport),
    Failed(String),
}

impl LookupState {
    #[cfg(test)]
    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading { .. })
    }

    /// True once a search has settled, either way.
    #[cfg(test)]
    pub(crate) fn is_settled(&self) -> bool {
        matches!(self, LookupState::Success(_) | LookupState::Failed(_))
    }

    /// State after a lookup completes.
    pub fn on_done(result: Result<LookupReport, LookupError>) -> Self {
        match result {
            Ok(report) => LookupState::Success(report),
            Err(e) => {
                tracing::warn!("Lookup failed: {}", e);
                LookupState::Failed(e.user_message())
            }
        }
    }

    pub fn report(&self) -> Option<&LookupReport> {
        match self {
            LookupState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LookupState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
