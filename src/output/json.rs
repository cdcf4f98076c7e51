use serde_json::{json, Value};

use crate::error::FarmopsError;
use crate::models::{CurrentUser, GrowingSystem, InventoryItem, RecurringTask, StaffMember, Task};
use crate::schedule::{is_overdue, to_comparison_key};

pub fn print(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &FarmopsError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

/// Stored fields plus the derived `overdue` flag.
pub fn task_json(t: &Task, today_key: &str) -> Value {
    let mut v = serde_json::to_value(t).unwrap_or(Value::Null);
    v["overdue"] = json!(is_overdue(t, today_key));
    v
}

pub fn task_summary(t: &Task, today_key: &str) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "status": t.status.as_str(),
        "priority": t.priority.map(|p| p.as_str()),
        "dueDate": non_empty(to_comparison_key(&t.due_date)),
        "assignTo": t.assignment.tag(),
        "overdue": is_overdue(t, today_key)
    })
}

pub fn recurring_json(r: &RecurringTask) -> Value {
    serde_json::to_value(r).unwrap_or(Value::Null)
}

pub fn staff_json(s: &StaffMember) -> Value {
    serde_json::to_value(s).unwrap_or(Value::Null)
}

pub fn user_json(u: &CurrentUser) -> Value {
    json!({
        "id": u.id,
        "email": u.email,
        "fullName": u.full_name,
        "rolesAssigned": u.roles_assigned,
        "authenticated": u.is_authenticated()
    })
}

pub fn item_json(i: &InventoryItem) -> Value {
    let mut v = serde_json::to_value(i).unwrap_or(Value::Null);
    v["low"] = json!(i.is_low());
    v
}

pub fn system_json(s: &GrowingSystem) -> Value {
    let mut v = serde_json::to_value(s).unwrap_or(Value::Null);
    v["free"] = json!(s.free());
    v["utilisation"] = json!((s.utilisation() * 10.0).round() / 10.0);
    v
}

fn non_empty(key: String) -> Option<String> {
    (!key.is_empty()).then_some(key)
}
