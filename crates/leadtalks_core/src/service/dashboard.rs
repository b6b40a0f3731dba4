//! Pipeline overview counters.

use crate::model::lead::Lead;
use crate::model::stage::StageId;
use crate::model::task::{Task, TaskStatus};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub active_leads: usize,
    pub pending_tasks: usize,
    pub done_tasks: usize,
    /// Done tasks over all tasks, rounded to a whole percent; `0` without tasks.
    pub completion_percent: u32,
    pub leads_per_stage: BTreeMap<StageId, usize>,
}

impl DashboardSummary {
    pub fn compute(leads: &[Lead], tasks: &[Task]) -> Self {
        let pending_tasks = count_status(tasks, TaskStatus::Pending);
        let done_tasks = count_status(tasks, TaskStatus::Done);
        let completion_percent = if tasks.is_empty() {
            0
        } else {
            (done_tasks as f64 / tasks.len() as f64 * 100.0).round() as u32
        };

        let mut leads_per_stage = BTreeMap::new();
        for lead in leads {
            *leads_per_stage.entry(lead.stage_id.clone()).or_insert(0) += 1;
        }

        Self {
            active_leads: leads.len(),
            pending_tasks,
            done_tasks,
            completion_percent,
            leads_per_stage,
        }
    }
}

fn count_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::DashboardSummary;

    #[test]
    fn empty_pipeline_reports_zero_completion() {
        let summary = DashboardSummary::compute(&[], &[]);
        assert_eq!(summary.active_leads, 0);
        assert_eq!(summary.completion_percent, 0);
        assert!(summary.leads_per_stage.is_empty());
    }
}
