use serde_json::json;

use crate::cli::commands::SystemCommands;
use crate::cli::Context;
use crate::db::inventory_repo;
use crate::error::FarmopsError;
use crate::models::GrowingSystem;
use crate::output;

pub fn run(ctx: &Context, cmd: SystemCommands) -> Result<(), FarmopsError> {
    match cmd {
        SystemCommands::Add { name, capacity, kind } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(FarmopsError::validation("System name must not be empty"));
            }
            if capacity == 0 {
                return Err(FarmopsError::validation("Capacity must be at least one site"));
            }
            let store = ctx.open_store()?;
            let system = inventory_repo::create_system(&store, |id| GrowingSystem {
                id,
                name,
                kind,
                capacity,
                occupied: 0,
                extra: Default::default(),
            })?;
            tracing::info!(system_id = system.id, capacity, "growing system added");
            print_system(ctx, &system, "Added");
            Ok(())
        }
        SystemCommands::List => {
            let store = ctx.open_store()?;
            let systems = inventory_repo::list_systems(&store)?;
            if ctx.json {
                let list: Vec<_> = systems.iter().map(output::json::system_json).collect();
                output::json::print(&output::json::success(json!({ "systems": list })));
            } else {
                output::text::print_system_list(&systems);
            }
            Ok(())
        }
        SystemCommands::Plant { id, count } => {
            let store = ctx.open_store()?;
            let system = inventory_repo::occupy_sites(&store, id, i64::from(count))?;
            tracing::info!(system_id = id, count, "sites planted");
            print_system(ctx, &system, "Planted");
            Ok(())
        }
        SystemCommands::Harvest { id, count } => {
            let store = ctx.open_store()?;
            let system = inventory_repo::occupy_sites(&store, id, -i64::from(count))?;
            tracing::info!(system_id = id, count, "sites harvested");
            print_system(ctx, &system, "Harvested");
            Ok(())
        }
    }
}

fn print_system(ctx: &Context, system: &GrowingSystem, verb: &str) {
    if ctx.json {
        output::json::print(&output::json::success(json!({
            "system": output::json::system_json(system)
        })));
    } else {
        println!(
            "{verb} #{} {}: {}/{} sites in use",
            system.id, system.name, system.occupied, system.capacity
        );
    }
}
