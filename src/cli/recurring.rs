use serde_json::json;

use crate::cli::commands::RecurringCommands;
use crate::cli::{now_stamp, parse_assignment, parse_priority, Context};
use crate::db::{recurring_repo, staff_repo, task_repo};
use crate::error::FarmopsError;
use crate::models::{Frequency, RecurringTask};
use crate::output;
use crate::schedule::date::to_comparison_key;
use crate::schedule::recurrence;

pub fn run(ctx: &Context, cmd: RecurringCommands) -> Result<(), FarmopsError> {
    match cmd {
        RecurringCommands::Add {
            title,
            frequency,
            start,
            end,
            assign,
            priority,
            task_type,
            description,
        } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(FarmopsError::validation("Title must not be empty"));
            }
            let Some(parsed) = Frequency::from_str(&frequency) else {
                return Err(FarmopsError::validation(format!(
                    "Invalid frequency: {frequency} (daily, weekly, biweekly, monthly)"
                )));
            };
            let store = ctx.open_store()?;
            let roster = staff_repo::list_staff(&store)?;
            let assignment = match assign.as_deref() {
                Some(raw) => parse_assignment(raw, &roster)?,
                None => Default::default(),
            };
            let priority = parse_priority(priority.as_deref())?;
            let start_date = ctx.day(&start, "start")?;
            let end_date = end.as_deref().map(|e| ctx.day(e, "end")).transpose()?;
            if end_date.as_ref().is_some_and(|e| e < &start_date) {
                return Err(FarmopsError::validation("End date is before the start date"));
            }

            let template = recurring_repo::create_recurring(&store, |id| RecurringTask {
                id,
                title,
                description,
                assignment,
                frequency: parsed.as_str().to_string(),
                start_date: Some(start_date),
                end_date,
                last_generated_date: None,
                priority: priority.map(|p| p.as_str().to_string()),
                task_type,
                active: true,
                extra: Default::default(),
            })?;
            tracing::info!(template_id = template.id, frequency = %template.frequency, "recurring task added");

            if ctx.json {
                output::json::print(&output::json::success(json!({
                    "recurringTask": output::json::recurring_json(&template)
                })));
            } else {
                println!("Added recurring task #{}: {} ({})", template.id, template.title, template.frequency);
            }
            Ok(())
        }
        RecurringCommands::List => {
            let store = ctx.open_store()?;
            let templates = recurring_repo::list_recurring(&store)?;
            if ctx.json {
                let list: Vec<_> = templates.iter().map(output::json::recurring_json).collect();
                output::json::print(&output::json::success(json!({ "recurringTasks": list })));
            } else {
                output::text::print_recurring_list(&templates);
            }
            Ok(())
        }
        RecurringCommands::Generate { through } => run_generate(ctx, through.as_deref()),
        RecurringCommands::Delete { id } => {
            let store = ctx.open_store()?;
            let removed = recurring_repo::delete_recurring(&store, id)?;
            if ctx.json {
                output::json::print(&output::json::success(json!({
                    "deleted": { "id": removed.id, "title": removed.title }
                })));
            } else {
                println!("Deleted recurring task #{}: {}", removed.id, removed.title);
            }
            Ok(())
        }
    }
}

fn run_generate(ctx: &Context, through: Option<&str>) -> Result<(), FarmopsError> {
    let through = match through {
        Some(raw) => crate::schedule::date::parse_day(raw, ctx.today)
            .ok_or_else(|| FarmopsError::validation(format!("Invalid through date: {raw}")))?,
        None => ctx.today,
    };
    let store = ctx.open_store()?;
    let mut templates = recurring_repo::list_recurring(&store)?;

    let plan: Vec<(usize, chrono::NaiveDate)> = templates
        .iter()
        .enumerate()
        .filter(|(_, r)| r.active)
        .flat_map(|(index, r)| {
            recurrence::pending_occurrences(r, through)
                .into_iter()
                .map(move |due| (index, due))
        })
        .collect();

    let stamp = now_stamp();
    let created = task_repo::create_tasks(&store, plan.len(), |n, id| {
        let (index, due) = plan[n];
        recurrence::instantiate(&templates[index], id, due, &stamp)
    })?;

    for &(index, due) in &plan {
        templates[index].last_generated_date = Some(to_comparison_key(&due));
    }
    if !plan.is_empty() {
        recurring_repo::save_recurring(&store, &templates)?;
    }
    tracing::info!(created = created.len(), through = %through, "generated recurring tasks");

    let today_key = ctx.today_key();
    if ctx.json {
        let tasks: Vec<_> = created
            .iter()
            .map(|t| output::json::task_summary(t, &today_key))
            .collect();
        output::json::print(&output::json::success(json!({
            "through": to_comparison_key(&through),
            "created": created.len(),
            "tasks": tasks
        })));
    } else {
        println!("Generated {} task(s) through {}", created.len(), to_comparison_key(&through));
        let refs: Vec<_> = created.iter().collect();
        output::text::print_task_list(&refs, &today_key);
    }
    Ok(())
}
