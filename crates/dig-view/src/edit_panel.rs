//! Detail/edit panel for one discovery.
//!
//! ```text
//!            open                 request_delete
//! Closed ─────────▶ Editing ──────────────────▶ ConfirmingDelete
//!   ▲                 ▲  │  ◀────cancel_delete────────┘   │
//!   │                 │  │ complete(Err)                   │ complete(Err)
//!   │      set_field  │  ▼                                 ▼
//!   │                Failed ◀──────────────────────────────┘
//!   └──── complete(Ok) / close ─── (any state)
//! ```
//!
//! Deleting needs the confirm step: [`EditPanel::confirm_delete`] only
//! yields an id from `ConfirmingDelete`.

use std::fmt;

use dig_core::{CoreError, Discovery, DiscoveryDraft, DiscoveryId, DiscoveryType, Era};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("no discovery is being edited")]
    NotEditing,

    #[error("title and description are required")]
    SaveDisabled,

    #[error("{field} must be a decimal number, got '{value}'")]
    InvalidCoordinate { field: Field, value: String },

    #[error("delete has not been confirmed")]
    NotConfirming,

    #[error(transparent)]
    InvalidField(#[from] CoreError),
}

/// The editable fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Description,
    BibleEra,
    Region,
    Type,
    SourceLink,
    Latitude,
    Longitude,
}

impl Field {
    pub const ALL: [Self; 8] = [
        Self::Title,
        Self::Description,
        Self::BibleEra,
        Self::Region,
        Self::Type,
        Self::SourceLink,
        Self::Latitude,
        Self::Longitude,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::BibleEra => "bibleEra",
            Self::Region => "region",
            Self::Type => "type",
            Self::SourceLink => "sourceLink",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form contents. Coordinates stay text until save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditForm {
    pub title: String,
    pub description: String,
    pub bible_era: Era,
    pub region: String,
    #[serde(rename = "type")]
    pub kind: DiscoveryType,
    pub source_link: String,
    pub latitude: String,
    pub longitude: String,
}

impl EditForm {
    #[must_use]
    pub fn from_discovery(discovery: &Discovery) -> Self {
        Self {
            title: discovery.title.clone(),
            description: discovery.description.clone(),
            bible_era: discovery.bible_era,
            region: discovery.region.clone(),
            kind: discovery.kind,
            source_link: discovery.source_link.clone(),
            latitude: discovery.latitude.to_string(),
            longitude: discovery.longitude.to_string(),
        }
    }

    /// Save stays disabled while either required text is blank.
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    fn set(&mut self, field: Field, value: &str) -> Result<(), PanelError> {
        match field {
            Field::Title => self.title = value.to_string(),
            Field::Description => self.description = value.to_string(),
            Field::BibleEra => self.bible_era = value.parse()?,
            Field::Region => self.region = value.to_string(),
            Field::Type => self.kind = value.parse()?,
            Field::SourceLink => self.source_link = value.to_string(),
            Field::Latitude => self.latitude = value.to_string(),
            Field::Longitude => self.longitude = value.to_string(),
        }
        Ok(())
    }

    fn coordinate(field: Field, raw: &str) -> Result<f64, PanelError> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PanelError::InvalidCoordinate {
                field,
                value: raw.to_string(),
            })
    }

    /// Full replacement body for the update call.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::SaveDisabled`] for blank required text and
    /// [`PanelError::InvalidCoordinate`] when a coordinate is not a number.
    pub fn to_draft(&self) -> Result<DiscoveryDraft, PanelError> {
        if !self.can_save() {
            return Err(PanelError::SaveDisabled);
        }
        Ok(DiscoveryDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            bible_era: self.bible_era,
            region: self.region.clone(),
            kind: self.kind,
            source_link: self.source_link.clone(),
            latitude: Self::coordinate(Field::Latitude, &self.latitude)?,
            longitude: Self::coordinate(Field::Longitude, &self.longitude)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Save,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Save => "save",
            Self::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Editing {
        target: DiscoveryId,
        form: EditForm,
    },
    ConfirmingDelete {
        target: DiscoveryId,
        form: EditForm,
    },
    /// The last save or delete was rejected. The form is kept so the user
    /// can correct it and try again.
    Failed {
        target: DiscoveryId,
        form: EditForm,
        operation: Operation,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct EditPanel {
    state: PanelState,
}

impl EditPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &PanelState {
        &self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.state, PanelState::Closed)
    }

    #[must_use]
    pub const fn target(&self) -> Option<&DiscoveryId> {
        match &self.state {
            PanelState::Closed => None,
            PanelState::Editing { target, .. }
            | PanelState::ConfirmingDelete { target, .. }
            | PanelState::Failed { target, .. } => Some(target),
        }
    }

    #[must_use]
    pub const fn form(&self) -> Option<&EditForm> {
        match &self.state {
            PanelState::Closed => None,
            PanelState::Editing { form, .. }
            | PanelState::ConfirmingDelete { form, .. }
            | PanelState::Failed { form, .. } => Some(form),
        }
    }

    /// Open on `discovery`, replacing whatever was open before.
    pub fn open(&mut self, discovery: &Discovery) {
        self.state = PanelState::Editing {
            target: discovery.id.clone(),
            form: EditForm::from_discovery(discovery),
        };
    }

    /// Edit one field. A failed panel goes back to `Editing` once an edit
    /// is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotEditing`] outside `Editing`/`Failed`, or
    /// [`PanelError::InvalidField`] for an unknown era or type. Neither the
    /// form nor the state changes on error.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), PanelError> {
        match &mut self.state {
            PanelState::Editing { form, .. } | PanelState::Failed { form, .. } => {
                form.set(field, value)?;
            }
            PanelState::Closed | PanelState::ConfirmingDelete { .. } => {
                return Err(PanelError::NotEditing);
            }
        }
        if matches!(self.state, PanelState::Failed { .. })
            && let PanelState::Failed { target, form, .. } = std::mem::take(&mut self.state)
        {
            self.state = PanelState::Editing { target, form };
        }
        Ok(())
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        match &self.state {
            PanelState::Editing { form, .. } | PanelState::Failed { form, .. } => form.can_save(),
            PanelState::Closed | PanelState::ConfirmingDelete { .. } => false,
        }
    }

    /// The update call to issue for the current form.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotEditing`] outside `Editing`/`Failed`,
    /// [`PanelError::SaveDisabled`] while save is disabled, or
    /// [`PanelError::InvalidCoordinate`] when latitude or longitude is not a number.
    pub fn save_request(&self) -> Result<(DiscoveryId, DiscoveryDraft), PanelError> {
        match &self.state {
            PanelState::Editing { target, form } | PanelState::Failed { target, form, .. } => {
                Ok((target.clone(), form.to_draft()?))
            }
            PanelState::Closed | PanelState::ConfirmingDelete { .. } => {
                Err(PanelError::NotEditing)
            }
        }
    }

    /// First delete step.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotEditing`] outside `Editing`/`Failed`.
    pub fn request_delete(&mut self) -> Result<(), PanelError> {
        match std::mem::take(&mut self.state) {
            PanelState::Editing { target, form } | PanelState::Failed { target, form, .. } => {
                self.state = PanelState::ConfirmingDelete { target, form };
                Ok(())
            }
            other => {
                self.state = other;
                Err(PanelError::NotEditing)
            }
        }
    }

    /// Back out of the confirm step. Does nothing in any other state.
    pub fn cancel_delete(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            PanelState::ConfirmingDelete { target, form } => PanelState::Editing { target, form },
            other => other,
        };
    }

    /// Second delete step: the id to delete.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NotConfirming`] unless the panel is in
    /// `ConfirmingDelete`.
    pub fn confirm_delete(&self) -> Result<DiscoveryId, PanelError> {
        match &self.state {
            PanelState::ConfirmingDelete { target, .. } => Ok(target.clone()),
            _ => Err(PanelError::NotConfirming),
        }
    }

    /// Record the outcome of a save or delete.
    ///
    /// Success closes the panel. Failure is logged and kept visible as
    /// `Failed` with the form intact.
    pub fn complete(&mut self, operation: Operation, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                tracing::debug!(%operation, target = ?self.target(), "panel operation succeeded");
                self.state = PanelState::Closed;
            }
            Err(message) => {
                tracing::error!(%operation, target = ?self.target(), %message, "panel operation failed");
                if let PanelState::Editing { target, form }
                | PanelState::ConfirmingDelete { target, form }
                | PanelState::Failed { target, form, .. } = std::mem::take(&mut self.state)
                {
                    self.state = PanelState::Failed {
                        target,
                        form,
                        operation,
                        message,
                    };
                }
            }
        }
    }

    pub fn close(&mut self) {
        self.state = PanelState::Closed;
    }
}
