//! The map's owned state: filters, search text, the displayed list, and
//! which fetch is allowed to replace that list.
//!
//! Every outbound read gets a [`FetchTicket`] with a strictly increasing
//! generation. Only the newest ticket may settle; anything older is dropped,
//! so the displayed list is always the latest successful response for the
//! active (filters, search) pair.

use dig_client::{ClientError, DiscoveryQuery, Trigger};
use dig_core::{CoreError, Discovery, DiscoveryDraft, DiscoveryId, FilterState};

use crate::marker::{Marker, MarkerPresenter, PopupEvent};

/// Handle for one in-flight list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: DiscoveryQuery,
}

impl FetchTicket {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn query(&self) -> &DiscoveryQuery {
        &self.query
    }
}

/// What [`MapView::settle`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// Latest response; the list now holds this many discoveries.
    Applied(usize),
    /// A newer request was issued after this one.
    Stale { generation: u64, latest: u64 },
    /// Latest request failed; the list was cleared.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct MapView {
    filters: FilterState,
    search: String,
    discoveries: Vec<Discovery>,
    markers: MarkerPresenter,
    generation: u64,
    latest: Option<FetchTicket>,
}

impl MapView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn discoveries(&self) -> &[Discovery] {
        &self.discoveries
    }

    #[must_use]
    pub fn discovery(&self, id: &DiscoveryId) -> Option<&Discovery> {
        self.discoveries.iter().find(|d| &d.id == id)
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerPresenter {
        &self.markers
    }

    #[must_use]
    pub fn marker_list(&self) -> Vec<Marker> {
        self.markers.markers(&self.discoveries)
    }

    /// The request whose response is still wanted, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&FetchTicket> {
        self.latest.as_ref()
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] for text that is neither "All"
    /// nor a known era.
    pub fn select_era(&mut self, raw: &str) -> Result<(), CoreError> {
        self.filters.select_era(raw)
    }

    pub fn select_region(&mut self, raw: &str) {
        self.filters.select_region(raw);
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] for text that is neither "All"
    /// nor a known type.
    pub fn select_kind(&mut self, raw: &str) -> Result<(), CoreError> {
        self.filters.select_kind(raw)
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn popup(&mut self, event: PopupEvent) {
        self.markers.apply(event);
    }

    /// Plan a read for `trigger` and make it the only one allowed to settle.
    pub fn begin(&mut self, trigger: Trigger) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            query: DiscoveryQuery::plan(trigger, &self.filters, &self.search),
        };
        tracing::debug!(generation = ticket.generation, query = ?ticket.query, "fetch issued");
        self.latest = Some(ticket.clone());
        ticket
    }

    /// Apply a finished read if it is still the latest.
    pub fn settle(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Discovery>, ClientError>,
    ) -> Settled {
        if self.latest.as_ref() != Some(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale response"
            );
            return Settled::Stale {
                generation: ticket.generation,
                latest: self.generation,
            };
        }
        self.latest = None;
        match result {
            Ok(discoveries) => {
                self.replace(discoveries);
                Settled::Applied(self.discoveries.len())
            }
            Err(error) => {
                tracing::warn!(%error, query = ?ticket.query, "error fetching discoveries");
                self.replace(Vec::new());
                Settled::Failed(error.to_string())
            }
        }
    }

    fn replace(&mut self, discoveries: Vec<Discovery>) {
        self.discoveries = discoveries;
        self.markers.retain(&self.discoveries);
    }

    /// Merge a successful update into the local list.
    pub fn apply_update(&mut self, id: &DiscoveryId, draft: DiscoveryDraft) -> bool {
        match self.discoveries.iter_mut().find(|d| &d.id == id) {
            Some(discovery) => {
                discovery.apply(draft);
                true
            }
            None => false,
        }
    }

    /// Drop a successfully deleted discovery from the local list.
    pub fn remove(&mut self, id: &DiscoveryId) -> bool {
        let before = self.discoveries.len();
        self.discoveries.retain(|d| &d.id != id);
        self.markers.apply(PopupEvent::Closed(id.clone()));
        self.discoveries.len() != before
    }
}
