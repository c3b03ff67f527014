//! Async driver tying the view state to a [`DiscoveryApi`].
//!
//! Reads are spawned so several can be in flight; their completions come
//! back over a channel and go through [`MapView::settle`], which keeps only
//! the newest. Saves and deletes run inline through the [`EditPanel`] and
//! patch the local list only on success.

use std::sync::Arc;
use std::time::Duration;

use dig_auth::Session;
use dig_client::{ClientError, DiscoveryApi, Trigger};
use dig_core::{CoreError, Discovery, DiscoveryId};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::debounce::{Debouncer, sleep_until};
use crate::edit_panel::{EditPanel, Operation, PanelError};
use crate::map_view::{FetchTicket, MapView, Settled};
use crate::marker::{PopupDetail, PopupEvent};

struct Completion {
    ticket: FetchTicket,
    result: Result<Vec<Discovery>, ClientError>,
}

/// Something the controller did while stepping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    /// Search text settled and a read was issued for it.
    SearchSettled(String),
    /// A read finished.
    Settled(Settled),
}

pub struct MapController<A: DiscoveryApi> {
    api: Arc<A>,
    session: Session,
    view: MapView,
    panel: EditPanel,
    debouncer: Debouncer<String>,
    in_flight: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<A: DiscoveryApi> MapController<A> {
    #[must_use]
    pub fn new(api: Arc<A>, session: Session, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            session,
            view: MapView::new(),
            panel: EditPanel::new(),
            debouncer: Debouncer::settled_at(debounce, String::new()),
            in_flight: 0,
            tx,
            rx,
        }
    }

    #[must_use]
    pub const fn view(&self) -> &MapView {
        &self.view
    }

    #[must_use]
    pub const fn panel(&self) -> &EditPanel {
        &self.panel
    }

    pub const fn panel_mut(&mut self) -> &mut EditPanel {
        &mut self.panel
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Nothing in flight and no keystroke waiting to settle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.debouncer.is_idle()
    }

    /// Issue a read for the current state.
    pub fn refresh(&mut self, trigger: Trigger) -> FetchTicket {
        let ticket = self.view.begin(trigger);
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let spawned = ticket.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = api.list_discoveries(spawned.query()).await;
            // The receiver lives as long as the controller.
            let _ = tx.send(Completion {
                ticket: spawned,
                result,
            });
        });
        ticket
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] for an unknown era; no read is issued.
    pub fn select_era(&mut self, raw: &str) -> Result<FetchTicket, CoreError> {
        self.view.select_era(raw)?;
        Ok(self.refresh(Trigger::Filters))
    }

    pub fn select_region(&mut self, raw: &str) -> FetchTicket {
        self.view.select_region(raw);
        self.refresh(Trigger::Filters)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::UnknownVariant`] for an unknown type; no read is issued.
    pub fn select_kind(&mut self, raw: &str) -> Result<FetchTicket, CoreError> {
        self.view.select_kind(raw)?;
        Ok(self.refresh(Trigger::Filters))
    }

    pub fn clear_filters(&mut self) -> FetchTicket {
        self.view.clear_filters();
        self.refresh(Trigger::Filters)
    }

    /// Record a raw keystroke. The read happens once the text settles.
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.debouncer.push(text.into(), Instant::now());
    }

    /// Wait for the next completion or search deadline and handle it.
    ///
    /// Returns `None` straight away when idle.
    pub async fn step(&mut self) -> Option<MapEvent> {
        loop {
            if self.is_idle() {
                return None;
            }
            let deadline = self.debouncer.deadline();
            tokio::select! {
                Some(completion) = self.rx.recv(), if self.in_flight > 0 => {
                    self.in_flight -= 1;
                    let settled = self.view.settle(&completion.ticket, completion.result);
                    return Some(MapEvent::Settled(settled));
                }
                () = sleep_until(deadline), if deadline.is_some() => {
                    if let Some(text) = self.debouncer.poll(Instant::now()) {
                        self.view.set_search(text.clone());
                        self.refresh(Trigger::Search);
                        return Some(MapEvent::SearchSettled(text));
                    }
                }
            }
        }
    }

    /// Step until nothing is pending.
    pub async fn run_until_idle(&mut self) -> Vec<MapEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.step().await {
            events.push(event);
        }
        events
    }

    pub fn open_popup(&mut self, id: &DiscoveryId) -> Option<PopupDetail> {
        let detail = PopupDetail::new(
            self.view.discovery(id)?,
            self.session.access().can_edit_discoveries(),
        );
        self.view.popup(PopupEvent::Opened(id.clone()));
        Some(detail)
    }

    pub fn close_popup(&mut self, id: &DiscoveryId) {
        self.view.popup(PopupEvent::Closed(id.clone()));
    }

    /// Open the edit panel on a displayed discovery.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::InvalidField`] wrapping [`CoreError::NotFound`]
    /// if the id is not in the current list.
    pub fn edit(&mut self, id: &DiscoveryId) -> Result<(), PanelError> {
        let discovery = self.view.discovery(id).ok_or_else(|| CoreError::NotFound {
            entity_type: "discovery".into(),
            id: id.to_string(),
        })?;
        self.panel.open(discovery);
        Ok(())
    }

    /// Submit the panel's form.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError`] when the panel cannot produce a request. A
    /// failed request is not an error here: it leaves the panel `Failed`.
    pub async fn save(&mut self) -> Result<(), PanelError> {
        let (id, draft) = self.panel.save_request()?;
        match self.api.update_discovery(&self.session, &id, &draft).await {
            Ok(()) => {
                self.view.apply_update(&id, draft);
                self.panel.complete(Operation::Save, Ok(()));
            }
            Err(error) => self.panel.complete(Operation::Save, Err(error.to_string())),
        }
        Ok(())
    }

    /// Issue the delete confirmed in the panel.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotConfirming`] unless the panel is in the
    /// confirm step. A failed request leaves the panel `Failed`.
    pub async fn delete(&mut self) -> Result<(), PanelError> {
        let id = self.panel.confirm_delete()?;
        match self.api.delete_discovery(&self.session, &id).await {
            Ok(()) => {
                self.view.remove(&id);
                self.panel.complete(Operation::Delete, Ok(()));
            }
            Err(error) => self.panel.complete(Operation::Delete, Err(error.to_string())),
        }
        Ok(())
    }
}
