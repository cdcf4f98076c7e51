use crate::models::Task;

use super::date::{same_day, shift_key, to_comparison_key};

pub const BIWEEKLY: &str = "biweekly";

/// Days before the due date that a biweekly task without a stored window
/// is shown for, so the window covers fourteen days including the due date.
const BIWEEKLY_LOOKBACK_DAYS: i64 = 13;

/// Lower-cases a frequency descriptor and drops everything but letters:
/// "Bi-Weekly", "bi_weekly" and "BIWEEKLY" all become `biweekly`.
pub fn normalize_frequency(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The inclusive `[start, end]` keys a task is shown between. Either side
/// falls back to the other date field when its own is absent.
pub fn window(task: &Task) -> (String, String) {
    let start = to_comparison_key(&task.visible_from_date.as_ref().or(task.due_date.as_ref()));
    let end = to_comparison_key(&task.due_date.as_ref().or(task.visible_from_date.as_ref()));
    (start, end)
}

/// Decides whether `task` belongs on the calendar day `target_key`
/// (`YYYY-MM-DD`). Tasks with no usable date are never visible.
pub fn is_visible_on(task: &Task, target_key: &str) -> bool {
    let target = to_comparison_key(target_key);
    if target.is_empty() {
        return false;
    }

    let frequency = task.frequency_tag().map(normalize_frequency).unwrap_or_default();
    let biweekly = frequency == BIWEEKLY;
    let (start, end) = window(task);
    let has_range = !start.is_empty() && !end.is_empty() && start != end;

    if biweekly && !end.is_empty() && !has_range {
        let calculated_start = shift_key(&end, -BIWEEKLY_LOOKBACK_DAYS);
        let visible = !calculated_start.is_empty()
            && calculated_start.as_str() <= target.as_str()
            && target <= end;
        tracing::trace!(task_id = task.id, rule = "biweekly_fallback", %calculated_start, %end, %target, visible);
        return visible;
    }

    if has_range || biweekly {
        let visible = !start.is_empty() && !end.is_empty() && start <= target && target <= end;
        tracing::trace!(task_id = task.id, rule = "range", %start, %end, %target, visible);
        return visible;
    }

    let task_date = if start.is_empty() { &end } else { &start };
    if task_date.is_empty() {
        tracing::trace!(task_id = task.id, rule = "no_date", visible = false);
        return false;
    }
    let visible = same_day(task_date.as_str(), target.as_str());
    tracing::trace!(task_id = task.id, rule = "single_day", %task_date, %target, visible);
    visible
}
