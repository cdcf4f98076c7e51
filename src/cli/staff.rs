use serde_json::json;

use crate::cli::commands::StaffCommands;
use crate::cli::Context;
use crate::db::staff_repo;
use crate::error::FarmopsError;
use crate::models::{StaffId, StaffMember};
use crate::output;

pub fn run(ctx: &Context, cmd: StaffCommands) -> Result<(), FarmopsError> {
    match cmd {
        StaffCommands::Add {
            email,
            full_name,
            roles,
            id,
        } => {
            let email = email.trim().to_string();
            let full_name = full_name.trim().to_string();
            if email.is_empty() || full_name.is_empty() {
                return Err(FarmopsError::validation("Email and full name must not be empty"));
            }
            let roles: Vec<String> = roles.iter().map(|r| r.trim().to_string()).collect();
            if roles.iter().any(String::is_empty) {
                return Err(FarmopsError::validation("Role names must not be empty"));
            }

            let store = ctx.open_store()?;
            let member = staff_repo::create_staff(&store, id.as_deref().map(StaffId::new), |id| StaffMember {
                id,
                email,
                full_name,
                roles_assigned: roles,
                active: true,
                extra: Default::default(),
            })?;
            tracing::info!(staff_id = %member.id, "staff member added");

            if ctx.json {
                output::json::print(&output::json::success(json!({
                    "staff": output::json::staff_json(&member)
                })));
            } else {
                println!("Added staff {}: {} <{}>", member.id, member.full_name, member.email);
            }
            Ok(())
        }
        StaffCommands::List => {
            let store = ctx.open_store()?;
            let staff = staff_repo::list_staff(&store)?;
            if ctx.json {
                let list: Vec<_> = staff.iter().map(output::json::staff_json).collect();
                output::json::print(&output::json::success(json!({ "staff": list })));
            } else {
                output::text::print_staff_list(&staff);
            }
            Ok(())
        }
        StaffCommands::Deactivate { id } => {
            let store = ctx.open_store()?;
            let member = staff_repo::update_staff(&store, &StaffId::new(&id), |s| s.active = false)?;
            tracing::info!(staff_id = %member.id, "staff member deactivated");

            if ctx.json {
                output::json::print(&output::json::success(json!({
                    "staff": output::json::staff_json(&member)
                })));
            } else {
                println!("Deactivated staff {}: {}", member.id, member.full_name);
            }
            Ok(())
        }
    }
}
