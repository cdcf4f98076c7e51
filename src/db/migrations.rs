//! One-off data repairs. These run only when asked for, never as a side
//! effect of reading.

use std::collections::HashMap;

use crate::error::FarmopsError;
use crate::models::{RecurringTask, Task};

use super::{recurring_repo, task_repo, Store};

/// Gives unassigned tasks the assignment of the recurring template they
/// were generated from. Returns the ids of the tasks that changed.
pub fn backfill_assignments(tasks: &mut [Task], templates: &[RecurringTask]) -> Vec<u64> {
    let by_id: HashMap<u64, &RecurringTask> = templates.iter().map(|r| (r.id, r)).collect();
    let mut repaired = Vec::new();

    for task in tasks.iter_mut().filter(|t| t.assignment.is_unassigned()) {
        let Some(template_id) = task.recurring_task_id else {
            continue;
        };
        let Some(template) = by_id.get(&template_id) else {
            tracing::debug!(task_id = task.id, template_id, "template no longer exists");
            continue;
        };
        if template.assignment.is_unassigned() {
            continue;
        }
        task.assignment = template.assignment.clone();
        tracing::info!(task_id = task.id, template_id, assignment = %task.assignment, "backfilled assignment");
        repaired.push(task.id);
    }
    repaired
}

pub fn repair_assignments(store: &Store) -> Result<Vec<u64>, FarmopsError> {
    let mut tasks = task_repo::list_tasks(store)?;
    let templates = recurring_repo::list_recurring(store)?;
    let repaired = backfill_assignments(&mut tasks, &templates);
    if !repaired.is_empty() {
        task_repo::save_tasks(store, &tasks)?;
    }
    Ok(repaired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, StaffId};

    fn template(id: u64, assignment: Assignment) -> RecurringTask {
        RecurringTask {
            id,
            title: "Weekly clean".into(),
            description: None,
            assignment,
            frequency: "weekly".into(),
            start_date: Some("2025-08-01".into()),
            end_date: None,
            last_generated_date: None,
            priority: None,
            task_type: None,
            active: true,
            extra: Default::default(),
        }
    }

    fn generated(id: u64, template_id: Option<u64>, assignment: Assignment) -> Task {
        let mut t = Task::new(id, "Weekly clean");
        t.recurring_task_id = template_id;
        t.assignment = assignment;
        t
    }

    #[test]
    fn test_backfills_only_unassigned_generated_tasks() {
        let templates = vec![
            template(1, Assignment::Role("Cleaner".into())),
            template(2, Assignment::Unassigned),
        ];
        let mut tasks = vec![
            generated(10, Some(1), Assignment::Unassigned),
            generated(11, Some(1), Assignment::User(StaffId::from(3))),
            generated(12, Some(2), Assignment::Unassigned),
            generated(13, Some(99), Assignment::Unassigned),
            generated(14, None, Assignment::Unassigned),
        ];

        let repaired = backfill_assignments(&mut tasks, &templates);
        assert_eq!(repaired, vec![10]);
        assert_eq!(tasks[0].assignment, Assignment::Role("Cleaner".into()));
        assert_eq!(tasks[1].assignment, Assignment::User(StaffId::from(3)));
        assert!(tasks[2].assignment.is_unassigned());
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let templates = vec![template(1, Assignment::AllStaff)];
        let mut tasks = vec![generated(10, Some(1), Assignment::Unassigned)];
        assert_eq!(backfill_assignments(&mut tasks, &templates).len(), 1);
        assert!(backfill_assignments(&mut tasks, &templates).is_empty());
    }
}
