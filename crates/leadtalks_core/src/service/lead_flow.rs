//! Lead-detail wizard: create a task or meeting for one lead.
//!
//! # Responsibility
//! - Track which context is open: nothing, a lead's detail view, or an event
//!   draft opened from that view.
//! - Seed event drafts with the lead link and a lead name snapshot.
//! - Commit the event and its companion note through the store.
//!
//! # Invariants
//! - Opening a draft closes the lead-detail context.
//! - Confirm and cancel both return to the lead the draft was opened from,
//!   unless that lead was deleted meanwhile; confirm then closes the flow.
//! - Cancel creates nothing; confirm creates the event and note together or
//!   neither (validation failures keep the draft open).

use crate::clock::Clock;
use crate::model::event::{CalendarEvent, EventForm, EventKind};
use crate::model::lead::LeadId;
use crate::model::note::Note;
use crate::service::store::{CrmStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum FlowError {
    LeadNotFound(LeadId),
    /// Confirm or cancel without an open event draft.
    NoEventDraft,
    Store(StoreError),
}

impl Display for FlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeadNotFound(lead_id) => write!(f, "lead not found: {lead_id}"),
            Self::NoEventDraft => write!(f, "no event draft is open"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FlowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FlowError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Currently open context of the leads page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowContext {
    #[default]
    Closed,
    LeadDetail {
        lead_id: LeadId,
    },
    EventDraft {
        form: EventForm,
        lead_name: Option<String>,
        return_to: LeadId,
    },
}

#[derive(Debug, Default)]
pub struct LeadFlow {
    context: FlowContext,
}

impl LeadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    pub fn open_lead_detail<C: Clock>(
        &mut self,
        store: &CrmStore<C>,
        lead_id: &str,
    ) -> Result<(), FlowError> {
        if !store.leads().contains_id(lead_id) {
            return Err(FlowError::LeadNotFound(lead_id.to_string()));
        }
        self.context = FlowContext::LeadDetail {
            lead_id: lead_id.to_string(),
        };
        Ok(())
    }

    pub fn close(&mut self) {
        self.context = FlowContext::Closed;
    }

    /// `onCreateTask(leadId)`.
    pub fn on_create_task<C: Clock>(
        &mut self,
        store: &CrmStore<C>,
        lead_id: &str,
    ) -> Result<&mut EventForm, FlowError> {
        self.open_draft(store, lead_id, EventKind::Task)
    }

    /// `onCreateMeeting(leadId)`.
    pub fn on_create_meeting<C: Clock>(
        &mut self,
        store: &CrmStore<C>,
        lead_id: &str,
    ) -> Result<&mut EventForm, FlowError> {
        self.open_draft(store, lead_id, EventKind::Meeting)
    }

    /// Open draft for the presentation layer to fill in.
    pub fn draft_mut(&mut self) -> Option<&mut EventForm> {
        match &mut self.context {
            FlowContext::EventDraft { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Commits the open draft and returns to the lead-detail context.
    ///
    /// # Errors
    /// - `NoEventDraft` when no draft is open.
    /// - `LeadNotFound` when the lead was deleted after the draft opened;
    ///   nothing is created and the flow is closed.
    /// - `Store` when the draft fails validation; the draft stays open.
    pub fn confirm_event<C: Clock>(
        &mut self,
        store: &mut CrmStore<C>,
    ) -> Result<(CalendarEvent, Note), FlowError> {
        let FlowContext::EventDraft {
            form,
            lead_name,
            return_to,
        } = &self.context
        else {
            return Err(FlowError::NoEventDraft);
        };

        if !store.leads().contains_id(return_to) {
            let lead_id = return_to.clone();
            warn!(
                "event=event_draft_confirm module=lead_flow status=warn reason=lead_deleted lead_id={}",
                lead_id
            );
            self.context = FlowContext::Closed;
            return Err(FlowError::LeadNotFound(lead_id));
        }

        let created = store.commit_linked_event(form, return_to, lead_name.clone())?;
        self.context = FlowContext::LeadDetail {
            lead_id: return_to.clone(),
        };
        Ok(created)
    }

    /// Drops the open draft and returns to the lead-detail context.
    pub fn cancel_event(&mut self) -> Result<(), FlowError> {
        let FlowContext::EventDraft { return_to, .. } = &self.context else {
            return Err(FlowError::NoEventDraft);
        };
        info!(
            "event=event_draft_cancel module=lead_flow status=ok lead_id={}",
            return_to
        );
        self.context = FlowContext::LeadDetail {
            lead_id: return_to.clone(),
        };
        Ok(())
    }

    fn open_draft<C: Clock>(
        &mut self,
        store: &CrmStore<C>,
        lead_id: &str,
        kind: EventKind,
    ) -> Result<&mut EventForm, FlowError> {
        let lead_name = store
            .lead_name_snapshot(lead_id)
            .ok_or_else(|| FlowError::LeadNotFound(lead_id.to_string()))?;

        info!(
            "event=event_draft_open module=lead_flow status=ok lead_id={} kind={:?}",
            lead_id, kind
        );
        self.context = FlowContext::EventDraft {
            form: EventForm {
                kind,
                lead_id: Some(lead_id.to_string()),
                ..EventForm::default()
            },
            lead_name: Some(lead_name),
            return_to: lead_id.to_string(),
        };
        self.draft_mut().ok_or(FlowError::NoEventDraft)
    }
}
