use crate::error::FarmopsError;
use crate::models::Task;

use super::store::{Collection, Store, TASKS_FILE};

pub fn list_tasks(store: &Store) -> Result<Vec<Task>, FarmopsError> {
    store.load(TASKS_FILE)
}

pub fn get_task(store: &Store, id: u64) -> Result<Task, FarmopsError> {
    list_tasks(store)?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| FarmopsError::task_not_found(id))
}

/// Appends `count` tasks built by `build`, which receives the position and
/// the id reserved for it. The ids come from one counter update.
pub fn create_tasks<F>(store: &Store, count: usize, mut build: F) -> Result<Vec<Task>, FarmopsError>
where
    F: FnMut(usize, u64) -> Task,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    let mut tasks = list_tasks(store)?;
    let max = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    let first = store.reserve_ids(Collection::Task, max, count as u64)?;
    let created: Vec<Task> = (0..count)
        .map(|index| build(index, first + index as u64))
        .collect();
    tasks.extend(created.iter().cloned());
    store.save(TASKS_FILE, &tasks)?;
    Ok(created)
}

pub fn create_task<F>(store: &Store, build: F) -> Result<Task, FarmopsError>
where
    F: FnOnce(u64) -> Task,
{
    let mut tasks = list_tasks(store)?;
    let max = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    let id = store.next_id(Collection::Task, max)?;
    let task = build(id);
    tasks.push(task.clone());
    store.save(TASKS_FILE, &tasks)?;
    Ok(task)
}

/// Applies `change` to one task and saves the collection.
pub fn update_task<F>(store: &Store, id: u64, change: F) -> Result<Task, FarmopsError>
where
    F: FnOnce(&mut Task) -> Result<(), FarmopsError>,
{
    let mut tasks = list_tasks(store)?;
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| FarmopsError::task_not_found(id))?;
    change(task)?;
    let updated = task.clone();
    store.save(TASKS_FILE, &tasks)?;
    Ok(updated)
}

pub fn delete_task(store: &Store, id: u64) -> Result<Task, FarmopsError> {
    let mut tasks = list_tasks(store)?;
    let index = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| FarmopsError::task_not_found(id))?;
    let removed = tasks.remove(index);
    store.save(TASKS_FILE, &tasks)?;
    Ok(removed)
}

pub fn save_tasks(store: &Store, tasks: &[Task]) -> Result<(), FarmopsError> {
    store.save(TASKS_FILE, tasks)
}
