use std::collections::BTreeSet;

use crate::models::{CurrentUser, GrowingSystem, InventoryItem, RecurringTask, StaffId, StaffMember, Task};
use crate::schedule::{is_overdue, to_comparison_key};

pub fn print_task(t: &Task, today_key: &str) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", t.status.as_str());
    if let Some(p) = t.priority {
        println!("  Priority: {}", p.as_str());
    }
    if let Some(ref kind) = t.task_type {
        println!("  Type: {kind}");
    }
    if let Some(ref due) = t.due_date {
        let flag = if is_overdue(t, today_key) { " (overdue)" } else { "" };
        println!("  Due: {due}{flag}");
    }
    if let Some(ref from) = t.visible_from_date {
        println!("  Visible from: {from}");
    }
    if let Some(ref to) = t.visible_to_date {
        println!("  Visible to: {to}");
    }
    if let Some(freq) = t.frequency_tag() {
        println!("  Frequency: {freq}");
    }
    if let Some(template) = t.recurring_task_id {
        println!("  Recurring template: {template}");
    }
    println!("  Assigned: {}", t.assignment);
}

pub fn print_task_list(tasks: &[&Task], today_key: &str) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        let due = to_comparison_key(&t.due_date);
        let tag = t.assignment.tag().map(|a| format!(" @{a}")).unwrap_or_default();
        println!(
            "  #{} [{}] {}{} due={}{}{}",
            t.id,
            t.status.as_str(),
            t.title,
            t.priority.map(|p| format!(" ({})", p.as_str())).unwrap_or_default(),
            if due.is_empty() { "-" } else { due.as_str() },
            if is_overdue(t, today_key) { " OVERDUE" } else { "" },
            tag
        );
    }
}

pub fn print_assignees(t: &Task, ids: &BTreeSet<StaffId>, roster: &[StaffMember]) {
    println!("Task #{} ({}) reaches {} staff:", t.id, t.assignment, ids.len());
    for id in ids {
        match roster.iter().find(|s| &s.id == id) {
            Some(s) => println!("  {} - {} <{}>", s.id, s.full_name, s.email),
            None => println!("  {id} - (not on roster)"),
        }
    }
}

pub fn print_recurring_list(templates: &[RecurringTask]) {
    if templates.is_empty() {
        println!("No recurring tasks found.");
        return;
    }
    for r in templates {
        println!(
            "  #{} {} [{}] from {}{}{} {}",
            r.id,
            r.title,
            r.frequency,
            r.start_date.as_deref().unwrap_or("-"),
            r.end_date.as_deref().map(|e| format!(" to {e}")).unwrap_or_default(),
            if r.active { "" } else { " (inactive)" },
            r.assignment
        );
    }
}

pub fn print_staff_list(staff: &[StaffMember]) {
    if staff.is_empty() {
        println!("No staff found.");
        return;
    }
    for s in staff {
        println!(
            "  {} {} <{}> [{}]{}",
            s.id,
            s.full_name,
            s.email,
            s.roles_assigned.join(", "),
            if s.active { "" } else { " (inactive)" }
        );
    }
}

pub fn print_user(u: &CurrentUser) {
    match u.id {
        Some(ref id) => {
            println!("Signed in as {} <{}> ({id})", u.full_name, u.email);
            if !u.roles_assigned.is_empty() {
                println!("  Roles: {}", u.roles_assigned.join(", "));
            }
        }
        None => println!("Not signed in."),
    }
}

pub fn print_item_list(items: &[&InventoryItem]) {
    if items.is_empty() {
        println!("No inventory items found.");
        return;
    }
    for i in items {
        println!(
            "  #{} {} {} {}{}{}",
            i.id,
            i.name,
            i.quantity,
            i.unit,
            i.location.as_deref().map(|l| format!(" @ {l}")).unwrap_or_default(),
            if i.is_low() { " LOW" } else { "" }
        );
    }
}

pub fn print_system_list(systems: &[GrowingSystem]) {
    if systems.is_empty() {
        println!("No growing systems found.");
        return;
    }
    for s in systems {
        println!(
            "  #{} {}{} {}/{} sites ({:.1}%)",
            s.id,
            s.name,
            s.kind.as_deref().map(|k| format!(" [{k}]")).unwrap_or_default(),
            s.occupied,
            s.capacity,
            s.utilisation()
        );
    }
}
