//! Pipeline stage collection operations.
//!
//! # Invariants
//! - A new stage gets `order = max(existing orders) + 1`, saturating at
//!   `i64::MAX`; the first stage of an empty pipeline gets `1`.
//! - Editing a stage keeps its id and order.
//! - Generated stage ids are distinct from the numeric order.

use crate::model::lead::Lead;
use crate::model::stage::{Stage, StageColor};
use crate::repo::collection::{Collection, Record};

impl Record for Stage {
    fn id(&self) -> &str {
        &self.id
    }
}

const STAGE_ID_PREFIX: &str = "etapa_";

pub fn next_order(stages: &[Stage]) -> i64 {
    stages
        .iter()
        .map(|stage| stage.order)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

pub fn stage_id_from_token(token: &str) -> String {
    format!("{STAGE_ID_PREFIX}{token}")
}

/// Creates one stage at the end of the pipeline.
pub fn create_stage(
    stages: &Collection<Stage>,
    id: String,
    label: String,
    color: StageColor,
) -> (Collection<Stage>, Stage) {
    let stage = Stage {
        id,
        label,
        color,
        order: next_order(stages),
    };
    (stages.append(stage.clone()), stage)
}

/// Relabels/recolors an existing stage. Returns `None` for unknown ids.
pub fn update_stage(
    stages: &Collection<Stage>,
    id: &str,
    label: String,
    color: StageColor,
) -> Option<(Collection<Stage>, Stage)> {
    let existing = stages.get(id)?;
    let stage = Stage {
        label,
        color,
        ..existing.clone()
    };
    let (next, _) = stages.upsert(stage.clone());
    Some((next, stage))
}

/// Stages ordered by ascending `order`; ties keep collection order.
pub fn ordered_stages(stages: &[Stage]) -> Vec<&Stage> {
    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|stage| stage.order);
    ordered
}

/// Number of leads currently assigned to `stage_id`.
pub fn leads_in_stage(leads: &[Lead], stage_id: &str) -> usize {
    leads.iter().filter(|lead| lead.stage_id == stage_id).count()
}
