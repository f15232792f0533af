//! Owns the current lookup state and serializes overlapping searches.
//!
//! Each accepted search gets a token one higher than the last. Starting a
//! search cancels the one in flight, and a result whose token is no longer the
//! latest is dropped, so the most recent search always wins.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::LookupError;
use crate::lookup::WeatherLookup;
use crate::state::LookupState;
use crate::types::{LookupReport, PlaceQuery};

/// Handle for one accepted search
#[derive(Debug)]
pub struct LookupTicket {
    token: u64,
    query: PlaceQuery,
    cancel: CancellationToken,
}

impl LookupTicket {
    pub fn query(&self) -> &PlaceQuery {
        &self.query
    }
}

#[derive(Debug, Default)]
struct Slot {
    state: LookupState,
    latest: u64,
    in_flight: Option<CancellationToken>,
}

pub struct LookupController {
    lookup: WeatherLookup,
    slot: Mutex<Slot>,
}

impl LookupController {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self {
            lookup,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> LookupState {
        self.slot.lock().state.clone()
    }

    /// Accept a search and move to `Loading`.
    ///
    /// Blank input is ignored: no ticket, no state change.
    pub fn begin(&self, raw: &str) -> Option<LookupTicket> {
        let query = PlaceQuery::parse(raw)?;
        let cancel = CancellationToken::new();

        let mut slot = self.slot.lock();
        if let Some(previous) = slot.in_flight.replace(cancel.clone()) {
            previous.cancel();
            tracing::debug!("Superseded lookup {}", slot.latest);
        }
        slot.latest += 1;
        slot.state = LookupState::Loading {
            query: query.to_string(),
        };

        tracing::debug!("Lookup {} started for {:?}", slot.latest, query.as_str());
        Some(LookupTicket {
            token: slot.latest,
            query,
            cancel,
        })
    }

    /// Store a result if the ticket is still the latest.
    ///
    /// Returns the settled state as stored, or `None` for a stale ticket.
    pub fn finish(
        &self,
        ticket: &LookupTicket,
        result: Result<LookupReport, LookupError>,
    ) -> Option<LookupState> {
        let mut slot = self.slot.lock();
        if ticket.token != slot.latest {
            tracing::debug!(
                "Discarding stale lookup {} (latest is {})",
                ticket.token,
                slot.latest
            );
            return None;
        }

        slot.state = LookupState::on_done(result);
        slot.in_flight = None;
        Some(slot.state.clone())
    }

    /// Run a full search.
    ///
    /// Returns the settled state, or `None` when the input was blank or a newer
    /// search took over before this one finished.
    pub async fn submit(&self, raw: &str) -> Option<LookupState> {
        let ticket = self.begin(raw)?;

        let lookup = self.lookup.clone();
        let query = ticket.query.clone();
        let mut handle = tokio::spawn(async move { lookup.run(&query).await });

        let result = tokio::select! {
            _ = ticket.cancel.cancelled() => {
                handle.abort();
                tracing::debug!("Lookup {} cancelled", ticket.token);
                return None;
            }
            joined = &mut handle => joined.unwrap_or_else(|e| Err(LookupError::from_join(e))),
        };

        self.finish(&ticket, result)
    }
}
