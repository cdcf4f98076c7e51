use crate::error::FarmopsError;
use crate::models::RecurringTask;

use super::store::{Collection, Store, RECURRING_FILE};

pub fn list_recurring(store: &Store) -> Result<Vec<RecurringTask>, FarmopsError> {
    store.load(RECURRING_FILE)
}

pub fn create_recurring<F>(store: &Store, build: F) -> Result<RecurringTask, FarmopsError>
where
    F: FnOnce(u64) -> RecurringTask,
{
    let mut templates = list_recurring(store)?;
    let max = templates.iter().map(|r| r.id).max().unwrap_or(0);
    let id = store.next_id(Collection::RecurringTask, max)?;
    let template = build(id);
    templates.push(template.clone());
    store.save(RECURRING_FILE, &templates)?;
    Ok(template)
}

pub fn delete_recurring(store: &Store, id: u64) -> Result<RecurringTask, FarmopsError> {
    let mut templates = list_recurring(store)?;
    let index = templates
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| FarmopsError::recurring_not_found(id))?;
    let removed = templates.remove(index);
    store.save(RECURRING_FILE, &templates)?;
    Ok(removed)
}

pub fn save_recurring(store: &Store, templates: &[RecurringTask]) -> Result<(), FarmopsError> {
    store.save(RECURRING_FILE, templates)
}
