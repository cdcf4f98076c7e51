use serde_json::json;

use crate::cli::commands::RepairCommands;
use crate::cli::Context;
use crate::db::migrations;
use crate::error::FarmopsError;
use crate::output;

pub fn run(ctx: &Context, cmd: RepairCommands) -> Result<(), FarmopsError> {
    match cmd {
        RepairCommands::Assignments => {
            let store = ctx.open_store()?;
            let repaired = migrations::repair_assignments(&store)?;
            tracing::info!(count = repaired.len(), "assignment repair finished");

            if ctx.json {
                output::json::print(&output::json::success(json!({
                    "count": repaired.len(),
                    "repaired": repaired
                })));
            } else if repaired.is_empty() {
                println!("No tasks needed repair.");
            } else {
                let ids: Vec<String> = repaired.iter().map(|id| format!("#{id}")).collect();
                println!("Repaired {} task(s): {}", repaired.len(), ids.join(", "));
            }
            Ok(())
        }
    }
}
