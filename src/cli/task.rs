use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::cli::{now_stamp, parse_assignment, parse_priority, Context};
use crate::db::{staff_repo, task_repo};
use crate::error::FarmopsError;
use crate::models::{Task, TaskStatus};
use crate::output;
use crate::schedule::{self, FilterCriteria, StatusFilter};

pub fn run(ctx: &Context, cmd: TaskCommands) -> Result<(), FarmopsError> {
    match cmd {
        TaskCommands::Add {
            title,
            description,
            priority,
            task_type,
            due,
            visible_from,
            visible_to,
            frequency,
            assign,
        } => run_add(
            ctx,
            NewTask {
                title,
                description,
                priority,
                task_type,
                due,
                visible_from,
                visible_to,
                frequency,
                assign,
            },
        ),
        TaskCommands::List {
            search,
            date,
            task_type,
            status,
            priority,
            mine,
        } => run_list(
            ctx,
            ListFilters {
                search,
                date,
                task_type,
                status,
                priority,
                mine,
            },
        ),
        TaskCommands::Show { id } => run_show(ctx, id),
        TaskCommands::Status { id, status } => run_status(ctx, id, &status),
        TaskCommands::Assign { id, tag } => run_assign(ctx, id, &tag),
        TaskCommands::Assignees { id } => run_assignees(ctx, id),
        TaskCommands::Delete { id } => run_delete(ctx, id),
    }
}

struct NewTask {
    title: String,
    description: Option<String>,
    priority: Option<String>,
    task_type: Option<String>,
    due: Option<String>,
    visible_from: Option<String>,
    visible_to: Option<String>,
    frequency: Option<String>,
    assign: Option<String>,
}

struct ListFilters {
    search: Option<String>,
    date: Option<String>,
    task_type: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    mine: bool,
}

fn run_add(ctx: &Context, new: NewTask) -> Result<(), FarmopsError> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
        return Err(FarmopsError::validation("Task title must not be empty"));
    }
    let store = ctx.open_store()?;
    let roster = staff_repo::list_staff(&store)?;

    let priority = parse_priority(new.priority.as_deref())?;
    let assignment = match new.assign.as_deref() {
        Some(raw) => parse_assignment(raw, &roster)?,
        None => Default::default(),
    };
    let due = new.due.as_deref().map(|d| ctx.day(d, "due")).transpose()?;
    let visible_from = new
        .visible_from
        .as_deref()
        .map(|d| ctx.day(d, "visible-from"))
        .transpose()?;
    let visible_to = new
        .visible_to
        .as_deref()
        .map(|d| ctx.day(d, "visible-to"))
        .transpose()?;
    if let (Some(from), Some(due)) = (&visible_from, &due) {
        if from > due {
            return Err(FarmopsError::validation(format!(
                "Visible-from date {from} is after the due date {due}"
            )));
        }
    }

    let stamp = now_stamp();
    let task = task_repo::create_task(&store, |id| {
        let mut t = Task::new(id, title);
        t.description = new.description;
        t.set_priority(priority);
        t.task_type = new.task_type;
        t.due_date = due;
        t.visible_from_date = visible_from;
        t.visible_to_date = visible_to;
        t.frequency = new.frequency;
        t.assignment = assignment;
        t.created_at = Some(stamp.clone());
        t.updated_at = Some(stamp);
        t
    })?;
    tracing::info!(task_id = task.id, "task added");

    if ctx.json {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task, &ctx.today_key())
        })));
    } else {
        println!("Added task #{}: {}", task.id, task.title);
    }
    Ok(())
}

fn run_list(ctx: &Context, filters: ListFilters) -> Result<(), FarmopsError> {
    let store = ctx.open_store()?;
    let snapshot = store.snapshot()?;
    let today_key = ctx.today_key();

    let mut criteria = FilterCriteria::new(today_key.clone());
    criteria.text_query = filters.search;
    criteria.selected_date_key = filters.date.as_deref().map(|d| ctx.day(d, "list")).transpose()?;
    criteria.category = filters.task_type;
    criteria.status = StatusFilter::parse(filters.status.as_deref()).ok_or_else(|| {
        FarmopsError::validation(format!(
            "Invalid status filter: {} (pending, in_progress, completed, approved, overdue, all)",
            filters.status.as_deref().unwrap_or_default()
        ))
    })?;
    criteria.priority = match filters.priority.as_deref() {
        None | Some("all") => None,
        other => parse_priority(other)?,
    };

    let mut tasks = schedule::filter(&snapshot.tasks, &criteria);
    let user = if filters.mine {
        let user = ctx.current_user(&store, &snapshot.staff)?;
        tasks = schedule::assigned_to_user(tasks, &user, Some(snapshot.staff.as_slice()));
        Some(user)
    } else {
        None
    };
    tracing::debug!(total = snapshot.tasks.len(), shown = tasks.len(), "filtered task list");

    if ctx.json {
        let tasks_json: Vec<_> = tasks
            .iter()
            .map(|t| output::json::task_summary(t, &today_key))
            .collect();
        let mut data = json!({
            "tasks": tasks_json,
            "count": tasks.len(),
            "today": today_key,
        });
        if let Some(ref date) = criteria.selected_date_key {
            data["date"] = json!(date);
        }
        if let Some(ref user) = user {
            data["user"] = output::json::user_json(user);
        }
        output::json::print(&output::json::success(data));
    } else {
        if let Some(ref user) = user {
            output::text::print_user(user);
        }
        output::text::print_task_list(&tasks, &today_key);
    }
    Ok(())
}

fn run_show(ctx: &Context, id: u64) -> Result<(), FarmopsError> {
    let store = ctx.open_store()?;
    let task = task_repo::get_task(&store, id)?;
    let today_key = ctx.today_key();

    if ctx.json {
        let mut data = output::json::task_json(&task, &today_key);
        data["visibleToday"] = json!(schedule::is_visible_on(&task, &today_key));
        output::json::print(&output::json::success(json!({ "task": data })));
    } else {
        output::text::print_task(&task, &today_key);
    }
    Ok(())
}

fn run_status(ctx: &Context, id: u64, raw: &str) -> Result<(), FarmopsError> {
    let status = TaskStatus::from_str(raw).ok_or_else(|| {
        FarmopsError::validation(format!(
            "Invalid status: {raw} (pending, in_progress, completed, approved)"
        ))
    })?;
    let store = ctx.open_store()?;
    let stamp = now_stamp();
    let mut previous = status;
    let task = task_repo::update_task(&store, id, |t| {
        previous = t.status;
        t.set_status(status);
        t.updated_at = Some(stamp);
        Ok(())
    })?;
    tracing::info!(task_id = id, from = previous.as_str(), to = status.as_str(), "task status changed");

    if ctx.json {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_summary(&task, &ctx.today_key()),
            "previousStatus": previous.as_str()
        })));
    } else {
        println!(
            "Task #{}: {} → {}",
            task.id,
            previous.as_str(),
            task.status.as_str()
        );
    }
    Ok(())
}

fn run_assign(ctx: &Context, id: u64, raw: &str) -> Result<(), FarmopsError> {
    let store = ctx.open_store()?;
    let roster = staff_repo::list_staff(&store)?;
    let assignment = parse_assignment(raw, &roster)?;
    let stamp = now_stamp();
    let task = task_repo::update_task(&store, id, |t| {
        t.assignment = assignment;
        t.updated_at = Some(stamp);
        Ok(())
    })?;

    if ctx.json {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_summary(&task, &ctx.today_key())
        })));
    } else {
        println!("Task #{} assigned to {}", task.id, task.assignment);
    }
    Ok(())
}

fn run_assignees(ctx: &Context, id: u64) -> Result<(), FarmopsError> {
    let store = ctx.open_store()?;
    let task = task_repo::get_task(&store, id)?;
    let roster = staff_repo::list_staff(&store)?;
    let ids = schedule::assigned_staff_ids(&task, &roster);

    if ctx.json {
        let staff: Vec<_> = ids
            .iter()
            .map(|id| match roster.iter().find(|s| &s.id == id) {
                Some(s) => output::json::staff_json(s),
                None => json!({ "id": id }),
            })
            .collect();
        output::json::print(&output::json::success(json!({
            "taskId": task.id,
            "assignTo": task.assignment.tag(),
            "staffIds": ids,
            "staff": staff
        })));
    } else {
        output::text::print_assignees(&task, &ids, &roster);
    }
    Ok(())
}

fn run_delete(ctx: &Context, id: u64) -> Result<(), FarmopsError> {
    let store = ctx.open_store()?;
    let task = task_repo::delete_task(&store, id)?;
    tracing::info!(task_id = id, "task deleted");

    if ctx.json {
        output::json::print(&output::json::success(json!({
            "deleted": { "id": task.id, "title": task.title }
        })));
    } else {
        println!("Deleted task #{}: {}", task.id, task.title);
    }
    Ok(())
}
