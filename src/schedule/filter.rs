use crate::models::{CurrentUser, Priority, StaffMember, Task, TaskStatus};

use super::assignment::is_assigned_to;
use super::date::to_comparison_key;
use super::visibility::is_visible_on;

const ALL: &str = "all";
const OVERDUE: &str = "overdue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Is(TaskStatus),
    Overdue,
}

impl StatusFilter {
    /// `all` (or nothing) disables the filter, `overdue` selects on the
    /// derived flag. Returns `None` for an unknown status.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") => Some(Self::Any),
            Some(s) if s.eq_ignore_ascii_case(ALL) => Some(Self::Any),
            Some(s) if s.eq_ignore_ascii_case(OVERDUE) => Some(Self::Overdue),
            Some(s) => TaskStatus::from_str(s).map(Self::Is),
        }
    }
}

/// Narrowing applied to a task list. Every field is optional; the active
/// ones are AND-ed together.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Today's key, the reference for overdue checks.
    pub today_key: String,
    pub text_query: Option<String>,
    pub selected_date_key: Option<String>,
    pub category: Option<String>,
    pub status: StatusFilter,
    pub priority: Option<Priority>,
}

impl FilterCriteria {
    pub fn new(today_key: impl Into<String>) -> Self {
        Self {
            today_key: today_key.into(),
            ..Self::default()
        }
    }

    fn matches(&self, task: &Task) -> bool {
        self.matches_text(task)
            && self.matches_date(task)
            && self.matches_category(task)
            && self.matches_status(task)
            && self.priority.map_or(true, |p| task.priority == Some(p))
    }

    fn matches_text(&self, task: &Task) -> bool {
        let Some(query) = self.text_query.as_deref().filter(|q| !q.is_empty()) else {
            return true;
        };
        let query = query.to_lowercase();
        task.title.to_lowercase().contains(&query)
            || task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }

    fn matches_date(&self, task: &Task) -> bool {
        let Some(selected) = self.selected_date_key.as_deref() else {
            return true;
        };
        let selected = to_comparison_key(selected);
        if !selected.is_empty() && selected == self.today_key && is_overdue(task, &self.today_key) {
            return true;
        }
        is_visible_on(task, &selected)
    }

    fn matches_category(&self, task: &Task) -> bool {
        match self.category.as_deref() {
            None | Some(ALL) => true,
            Some(category) => task.task_type.as_deref() == Some(category),
        }
    }

    fn matches_status(&self, task: &Task) -> bool {
        match self.status {
            StatusFilter::Any => true,
            StatusFilter::Is(status) => task.status == status,
            StatusFilter::Overdue => is_overdue(task, &self.today_key),
        }
    }
}

/// A task is overdue when it has a readable due date earlier than today
/// and is neither completed nor approved.
pub fn is_overdue(task: &Task, today_key: &str) -> bool {
    if task.status.is_closed() {
        return false;
    }
    let due = to_comparison_key(&task.due_date);
    !due.is_empty() && !today_key.is_empty() && due.as_str() < today_key
}

/// Keeps the tasks matching every active criterion, in input order.
pub fn filter<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    tasks.iter().filter(|t| criteria.matches(t)).collect()
}

/// The "my tasks" view: tasks assigned to `user`, in input order.
pub fn assigned_to_user<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    user: &CurrentUser,
    roster: Option<&[StaffMember]>,
) -> Vec<&'a Task> {
    tasks
        .into_iter()
        .filter(|t| is_assigned_to(t, user, roster))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, StaffId};

    const TODAY: &str = "2025-08-10";

    fn task(id: u64, title: &str, due: Option<&str>, status: TaskStatus) -> Task {
        let mut t = Task::new(id, title);
        t.due_date = due.map(Into::into);
        t.status = status;
        t
    }

    fn sample() -> Vec<Task> {
        let mut a = task(1, "Seed lettuce", Some("2025-08-08"), TaskStatus::Pending);
        a.task_type = Some("planting".into());
        a.priority = Some(Priority::High);
        let mut b = task(2, "Clean filters", Some("2025-08-10"), TaskStatus::InProgress);
        b.description = Some("Rinse the DWC pump SEED trays".into());
        b.task_type = Some("maintenance".into());
        let c = task(3, "Harvest kale", Some("2025-08-05"), TaskStatus::Completed);
        let mut d = task(4, "Order nutrients", Some("2025-08-12"), TaskStatus::Pending);
        d.priority = Some(Priority::Low);
        let e = task(5, "Approve schedule", Some("2025-08-01"), TaskStatus::Approved);
        let f = task(6, "Tidy shed", None, TaskStatus::Pending);
        vec![a, b, c, d, e, f]
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_is_overdue() {
        let tasks = sample();
        let overdue: Vec<u64> = tasks.iter().filter(|t| is_overdue(t, TODAY)).map(|t| t.id).collect();
        assert_eq!(overdue, vec![1]);
    }

    #[test]
    fn test_overdue_ignores_unreadable_due() {
        let t = task(1, "x", Some("someday"), TaskStatus::Pending);
        assert!(!is_overdue(&t, TODAY));
    }

    #[test]
    fn test_no_criteria_keeps_everything_in_order() {
        let tasks = sample();
        let out = filter(&tasks, &FilterCriteria::new(TODAY));
        assert_eq!(ids(&out), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_text_matches_title_or_description() {
        let tasks = sample();
        let mut c = FilterCriteria::new(TODAY);
        c.text_query = Some("seed".into());
        assert_eq!(ids(&filter(&tasks, &c)), vec![1, 2]);
    }

    #[test]
    fn test_status_overdue_uses_derived_flag() {
        let mut tasks = sample();
        tasks[3].status = TaskStatus::InProgress;
        tasks[3].due_date = Some("2025-08-09T22:00:00Z".into());
        let mut c = FilterCriteria::new(TODAY);
        c.status = StatusFilter::Overdue;
        let expected: Vec<u64> = tasks.iter().filter(|t| is_overdue(t, TODAY)).map(|t| t.id).collect();
        assert_eq!(ids(&filter(&tasks, &c)), expected);
        assert_eq!(expected, vec![1, 4]);
    }

    #[test]
    fn test_exact_status() {
        let tasks = sample();
        let mut c = FilterCriteria::new(TODAY);
        c.status = StatusFilter::Is(TaskStatus::Pending);
        assert_eq!(ids(&filter(&tasks, &c)), vec![1, 4, 6]);
    }

    #[test]
    fn test_category_and_priority() {
        let tasks = sample();
        let mut c = FilterCriteria::new(TODAY);
        c.category = Some("all".into());
        assert_eq!(filter(&tasks, &c).len(), 6);
        c.category = Some("planting".into());
        assert_eq!(ids(&filter(&tasks, &c)), vec![1]);

        let mut c = FilterCriteria::new(TODAY);
        c.priority = Some(Priority::Low);
        assert_eq!(ids(&filter(&tasks, &c)), vec![4]);
    }

    #[test]
    fn test_today_includes_overdue() {
        let tasks = sample();
        let mut c = FilterCriteria::new(TODAY);
        c.selected_date_key = Some(TODAY.into());
        assert_eq!(ids(&filter(&tasks, &c)), vec![1, 2]);
    }

    #[test]
    fn test_other_day_excludes_overdue() {
        let tasks = sample();
        let mut c = FilterCriteria::new(TODAY);
        c.selected_date_key = Some("2025-08-12".into());
        assert_eq!(ids(&filter(&tasks, &c)), vec![4]);
    }

    #[test]
    fn test_criteria_combine() {
        let tasks = sample();
        let mut c = FilterCriteria::new(TODAY);
        c.selected_date_key = Some(TODAY.into());
        c.category = Some("maintenance".into());
        assert_eq!(ids(&filter(&tasks, &c)), vec![2]);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse(None), Some(StatusFilter::Any));
        assert_eq!(StatusFilter::parse(Some("all")), Some(StatusFilter::Any));
        assert_eq!(StatusFilter::parse(Some("overdue")), Some(StatusFilter::Overdue));
        assert_eq!(
            StatusFilter::parse(Some("in_progress")),
            Some(StatusFilter::Is(TaskStatus::InProgress))
        );
        assert_eq!(StatusFilter::parse(Some("stuck")), None);
    }

    #[test]
    fn test_assigned_to_user_preserves_order() {
        let mut tasks = sample();
        tasks[4].assignment = Assignment::Role("Packer".into());
        tasks[0].assignment = Assignment::AllStaff;
        tasks[2].assignment = Assignment::User(StaffId::from(9));
        let me = CurrentUser {
            id: Some(StaffId::from(9)),
            roles_assigned: vec!["Packer".into()],
            ..CurrentUser::default()
        };
        assert_eq!(ids(&assigned_to_user(&tasks, &me, None)), vec![1, 3, 5]);
        assert!(assigned_to_user(&tasks, &CurrentUser::anonymous(), None).is_empty());
    }
}
