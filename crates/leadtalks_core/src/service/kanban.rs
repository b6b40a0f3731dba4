//! Kanban reassignment engine.
//!
//! # Responsibility
//! - Turn a drag-end event into a stage reassignment of one lead.
//! - Group leads into stage columns with per-column sale totals.
//!
//! # Invariants
//! - A cancelled drag, or a drop back on the original slot, never produces
//!   a new lead snapshot.
//! - Only `stage_id` of the dragged lead changes; intra-stage position is not
//!   stored.
//! - Column totals are always computed from the filtered member list.

use crate::model::lead::{Lead, LeadId};
use crate::model::stage::{Stage, StageId};
use crate::repo::collection::Collection;
use crate::repo::lead_repo::assign_stage;
use crate::repo::stage_repo::ordered_stages;
use crate::view::filter::TextFilter;
use log::{debug, warn};

/// One end of a drag gesture: a stage column and a position inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropLocation {
    pub stage_id: StageId,
    pub index: usize,
}

impl DropLocation {
    pub fn new(stage_id: impl Into<StageId>, index: usize) -> Self {
        Self {
            stage_id: stage_id.into(),
            index,
        }
    }
}

/// Drag-end event emitted by the board.
///
/// `destination` is `None` when the card was released outside every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub lead_id: LeadId,
    pub source: DropLocation,
    pub destination: Option<DropLocation>,
}

#[derive(Debug, Clone)]
pub enum DragOutcome {
    Unchanged,
    Moved {
        leads: Collection<Lead>,
        stage_label: String,
    },
}

/// Resolves a drag-end event against the current leads and stages.
pub fn apply_drag(leads: &Collection<Lead>, stages: &[Stage], drag: &DragEnd) -> DragOutcome {
    let Some(destination) = drag.destination.as_ref() else {
        debug!(
            "event=kanban_drag module=kanban status=skipped reason=no_destination lead_id={}",
            drag.lead_id
        );
        return DragOutcome::Unchanged;
    };

    if destination == &drag.source {
        debug!(
            "event=kanban_drag module=kanban status=skipped reason=same_slot lead_id={}",
            drag.lead_id
        );
        return DragOutcome::Unchanged;
    }

    if !leads.contains_id(&drag.lead_id) {
        warn!(
            "event=kanban_drag module=kanban status=warn reason=unknown_lead lead_id={}",
            drag.lead_id
        );
        return DragOutcome::Unchanged;
    }

    let Some(stage) = stages.iter().find(|stage| stage.id == destination.stage_id) else {
        warn!(
            "event=kanban_drag module=kanban status=warn reason=unknown_stage stage_id={}",
            destination.stage_id
        );
        return DragOutcome::Unchanged;
    };

    DragOutcome::Moved {
        leads: assign_stage(leads, &drag.lead_id, &stage.id),
        stage_label: stage.label.clone(),
    }
}

/// One board column: a stage and its visible leads.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn<'a> {
    pub stage: &'a Stage,
    pub leads: Vec<&'a Lead>,
    pub total: f64,
}

impl StageColumn<'_> {
    /// Column header counter, e.g. `2 leads: R$ 2000.00`.
    pub fn summary(&self) -> String {
        format!("{} leads: {}", self.leads.len(), format_brl(self.total))
    }
}

/// Groups filtered leads by stage, stages ordered by ascending `order`.
///
/// Leads whose stage is missing appear in no column.
pub fn board<'a>(leads: &'a [Lead], stages: &'a [Stage], filter: &TextFilter) -> Vec<StageColumn<'a>> {
    let visible = filter.apply(leads);
    ordered_stages(stages)
        .into_iter()
        .map(|stage| {
            let members: Vec<&Lead> = visible
                .iter()
                .copied()
                .filter(|lead| lead.stage_id == stage.id)
                .collect();
            StageColumn {
                stage,
                total: stage_total(&members),
                leads: members,
            }
        })
        .collect()
}

pub fn stage_total(members: &[&Lead]) -> f64 {
    members.iter().map(|lead| lead.sale_value).sum()
}

pub fn format_brl(value: f64) -> String {
    format!("R$ {value:.2}")
}

pub fn move_message(stage_label: &str) -> String {
    format!("Lead movido para {stage_label}")
}
