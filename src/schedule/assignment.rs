use std::collections::BTreeSet;

use crate::models::{Assignment, CurrentUser, StaffId, StaffMember, Task};

/// Whether `task` belongs to `user`.
///
/// Unassigned tasks belong to nobody, and an anonymous user owns nothing.
/// When a roster is supplied, `all_staff` tasks additionally require the
/// user to be an active member of it.
pub fn is_assigned_to(task: &Task, user: &CurrentUser, roster: Option<&[StaffMember]>) -> bool {
    let Some(user_id) = user.id.as_ref().filter(|id| !id.is_empty()) else {
        return false;
    };

    match &task.assignment {
        Assignment::Unassigned => false,
        Assignment::AllStaff => match roster {
            None => true,
            Some(staff) => staff.iter().any(|s| s.active && &s.id == user_id),
        },
        Assignment::User(target) => target == user_id,
        Assignment::Role(role) => user.has_role(role),
        Assignment::Unrecognized(raw) => {
            tracing::warn!(task_id = task.id, tag = %raw, "unrecognized assignment tag");
            false
        }
    }
}

/// Every staff id a task reaches: all active staff for `all_staff`, the
/// active holders of a role for `role_X`, and the named user for `user_N`
/// (whether or not they are on the roster).
pub fn assigned_staff_ids(task: &Task, roster: &[StaffMember]) -> BTreeSet<StaffId> {
    match &task.assignment {
        Assignment::Unassigned => BTreeSet::new(),
        Assignment::AllStaff => roster
            .iter()
            .filter(|s| s.active)
            .map(|s| s.id.clone())
            .collect(),
        Assignment::Role(role) => roster
            .iter()
            .filter(|s| s.active && s.has_role(role))
            .map(|s| s.id.clone())
            .collect(),
        Assignment::User(id) => BTreeSet::from([id.clone()]),
        Assignment::Unrecognized(raw) => {
            tracing::warn!(task_id = task.id, tag = %raw, "unrecognized assignment tag");
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(tag: &str) -> Task {
        let mut t = Task::new(1, "Harvest basil");
        t.assignment = Assignment::parse(tag);
        t
    }

    fn user(id: Option<&str>, roles: &[&str]) -> CurrentUser {
        CurrentUser {
            id: id.map(StaffId::new),
            roles_assigned: roles.iter().map(|r| r.to_string()).collect(),
            ..CurrentUser::default()
        }
    }

    fn staff(id: u64, roles: &[&str], active: bool) -> StaffMember {
        StaffMember {
            id: StaffId::from(id),
            email: format!("s{id}@farm.test"),
            full_name: format!("Staff {id}"),
            roles_assigned: roles.iter().map(|r| r.to_string()).collect(),
            active,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_role_membership() {
        let t = task("role_Harvester");
        assert!(is_assigned_to(&t, &user(Some("1"), &["Harvester", "Packer"]), None));
        assert!(!is_assigned_to(&t, &user(Some("1"), &["Packer"]), None));
        assert!(!is_assigned_to(&t, &user(Some("1"), &["harvester"]), None));
    }

    #[test]
    fn test_all_staff_needs_identity() {
        let t = task("all_staff");
        assert!(!is_assigned_to(&t, &user(None, &[]), None));
        assert!(is_assigned_to(&t, &user(Some("7"), &[]), None));
    }

    #[test]
    fn test_all_staff_with_roster_needs_active_member() {
        let t = task("all_staff");
        let roster = vec![staff(7, &[], true), staff(8, &[], false)];
        assert!(is_assigned_to(&t, &user(Some("7"), &[]), Some(&roster)));
        assert!(!is_assigned_to(&t, &user(Some("8"), &[]), Some(&roster)));
        assert!(!is_assigned_to(&t, &user(Some("9"), &[]), Some(&roster)));
    }

    #[test]
    fn test_direct_user_normalises_ids() {
        let t = task("user_007");
        assert!(is_assigned_to(&t, &user(Some("7"), &[]), None));
        assert!(!is_assigned_to(&t, &user(Some("70"), &[]), None));
    }

    #[test]
    fn test_anonymous_owns_nothing() {
        for tag in ["user_1", "role_Harvester", "all_staff"] {
            assert!(!is_assigned_to(&task(tag), &user(None, &["Harvester"]), None));
        }
    }

    #[test]
    fn test_unassigned_and_unknown_fail_closed() {
        let u = user(Some("1"), &["Harvester"]);
        assert!(!is_assigned_to(&task(""), &u, None));
        assert!(!is_assigned_to(&task("Harvester"), &u, None));
        assert!(!is_assigned_to(&task("team_A"), &u, None));
    }

    #[test]
    fn test_assigned_staff_ids() {
        let roster = vec![
            staff(1, &["Harvester"], true),
            staff(2, &["Harvester", "Packer"], true),
            staff(3, &["Harvester"], false),
            staff(4, &["Packer"], true),
        ];

        let ids = |tag| {
            assigned_staff_ids(&task(tag), &roster)
                .into_iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("all_staff"), vec!["1", "2", "4"]);
        assert_eq!(ids("role_Harvester"), vec!["1", "2"]);
        assert_eq!(ids("user_42"), vec!["42"]);
        assert!(ids("").is_empty());
        assert!(ids("somebody").is_empty());
    }
}
