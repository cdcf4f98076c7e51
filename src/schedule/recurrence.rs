use chrono::{Duration, Months, NaiveDate};

use crate::models::{Frequency, RecurringTask, Task, TaskStatus};

use super::date::{parse_key, to_comparison_key};

/// Due dates a template still owes up to and including `through`.
///
/// Generation resumes after `lastGeneratedDate` when set, otherwise at the
/// first occurrence on or after `startDate`. Biweekly due dates mark the end
/// of each fourteen-day window, so the first one is `startDate + 13`.
pub fn pending_occurrences(template: &RecurringTask, through: NaiveDate) -> Vec<NaiveDate> {
    let Some(frequency) = Frequency::from_str(&template.frequency) else {
        tracing::warn!(template_id = template.id, frequency = %template.frequency, "unknown frequency, skipping");
        return Vec::new();
    };
    let Some(start) = parse_key(&to_comparison_key(&template.start_date)) else {
        tracing::warn!(template_id = template.id, "recurring task has no usable start date");
        return Vec::new();
    };
    let end = parse_key(&to_comparison_key(&template.end_date));
    let last = parse_key(&to_comparison_key(&template.last_generated_date));
    let limit = end.map_or(through, |e| e.min(through));

    let first = match frequency {
        Frequency::Biweekly => start + Duration::days(13),
        _ => start,
    };

    let mut out = Vec::new();
    let mut index: u32 = 0;
    while let Some(due) = occurrence(first, frequency, index) {
        if due > limit {
            break;
        }
        if last.map_or(true, |l| due > l) {
            out.push(due);
        }
        index += 1;
    }
    out
}

fn occurrence(first: NaiveDate, frequency: Frequency, index: u32) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => first.checked_add_signed(Duration::days(i64::from(index))),
        Frequency::Weekly => first.checked_add_signed(Duration::weeks(i64::from(index))),
        Frequency::Biweekly => first.checked_add_signed(Duration::weeks(2 * i64::from(index))),
        // Counted from the first date each time so a 31st clamps to short
        // months without drifting.
        Frequency::Monthly => first.checked_add_months(Months::new(index)),
    }
}

/// Builds the task for one occurrence. The caller assigns the id.
pub fn instantiate(template: &RecurringTask, id: u64, due: NaiveDate, created_at: &str) -> Task {
    let due_key = to_comparison_key(&due);
    let mut task = Task::new(id, template.title.clone());
    task.description = template.description.clone();
    task.status = TaskStatus::Pending;
    task.priority = template
        .priority
        .as_deref()
        .and_then(crate::models::Priority::from_str);
    task.task_type = template.task_type.clone();
    task.frequency = Some(template.frequency.clone());
    task.recurring_task_id = Some(template.id);
    task.assignment = template.assignment.clone();
    if Frequency::from_str(&template.frequency) == Some(Frequency::Biweekly) {
        task.visible_from_date = Some(to_comparison_key(&(due - Duration::days(13))));
    }
    task.due_date = Some(due_key);
    task.created_at = Some(created_at.to_string());
    task.updated_at = Some(created_at.to_string());
    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;
    use crate::schedule::is_visible_on;

    fn template(frequency: &str, start: &str) -> RecurringTask {
        RecurringTask {
            id: 4,
            title: "Check EC".into(),
            description: None,
            assignment: Assignment::Role("Grower".into()),
            frequency: frequency.into(),
            start_date: Some(start.into()),
            end_date: None,
            last_generated_date: None,
            priority: Some("medium".into()),
            task_type: Some("monitoring".into()),
            active: true,
            extra: Default::default(),
        }
    }

    fn d(s: &str) -> NaiveDate {
        parse_key(s).unwrap()
    }

    fn keys(dates: &[NaiveDate]) -> Vec<String> {
        dates.iter().map(|d| to_comparison_key(d)).collect()
    }

    #[test]
    fn test_daily() {
        let t = template("daily", "2025-08-01");
        assert_eq!(
            keys(&pending_occurrences(&t, d("2025-08-03"))),
            vec!["2025-08-01", "2025-08-02", "2025-08-03"]
        );
    }

    #[test]
    fn test_weekly_resumes_after_last_generated() {
        let mut t = template("Weekly", "2025-08-01");
        t.last_generated_date = Some("2025-08-08".into());
        assert_eq!(
            keys(&pending_occurrences(&t, d("2025-08-29"))),
            vec!["2025-08-15", "2025-08-22", "2025-08-29"]
        );
    }

    #[test]
    fn test_biweekly_due_dates_end_windows() {
        let t = template("Bi-Weekly", "2025-08-01");
        assert_eq!(
            keys(&pending_occurrences(&t, d("2025-08-31"))),
            vec!["2025-08-14", "2025-08-28"]
        );
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        let t = template("monthly", "2025-01-31");
        assert_eq!(
            keys(&pending_occurrences(&t, d("2025-04-30"))),
            vec!["2025-01-31", "2025-02-28", "2025-03-31", "2025-04-30"]
        );
    }

    #[test]
    fn test_end_date_caps_generation() {
        let mut t = template("daily", "2025-08-01");
        t.end_date = Some("2025-08-02".into());
        assert_eq!(pending_occurrences(&t, d("2025-08-10")).len(), 2);
    }

    #[test]
    fn test_unusable_templates_generate_nothing() {
        assert!(pending_occurrences(&template("hourly", "2025-08-01"), d("2025-09-01")).is_empty());
        assert!(pending_occurrences(&template("daily", "soon"), d("2025-09-01")).is_empty());
        assert!(pending_occurrences(&template("daily", "2025-08-01"), d("2025-07-01")).is_empty());
    }

    #[test]
    fn test_instantiate_biweekly_writes_window() {
        let t = template("Bi-Weekly", "2025-08-01");
        let task = instantiate(&t, 11, d("2025-08-14"), "2025-08-01T00:00:00Z");
        assert_eq!(task.id, 11);
        assert_eq!(task.recurring_task_id, Some(4));
        assert_eq!(task.assignment, Assignment::Role("Grower".into()));
        assert_eq!(task.visible_from_date.as_deref(), Some("2025-08-01"));
        assert_eq!(task.due_date.as_deref(), Some("2025-08-14"));
        assert!(is_visible_on(&task, "2025-08-01"));
        assert!(!is_visible_on(&task, "2025-07-31"));
    }

    #[test]
    fn test_instantiate_daily_is_single_day() {
        let t = template("daily", "2025-08-01");
        let task = instantiate(&t, 1, d("2025-08-02"), "2025-08-01T00:00:00Z");
        assert_eq!(task.visible_from_date, None);
        assert_eq!(task.priority, Some(crate::models::Priority::Medium));
        assert!(is_visible_on(&task, "2025-08-02"));
        assert!(!is_visible_on(&task, "2025-08-01"));
    }
}
