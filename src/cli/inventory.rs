use serde_json::json;

use crate::cli::commands::InventoryCommands;
use crate::cli::Context;
use crate::db::inventory_repo;
use crate::error::FarmopsError;
use crate::models::InventoryItem;
use crate::output;

pub fn run(ctx: &Context, cmd: InventoryCommands) -> Result<(), FarmopsError> {
    match cmd {
        InventoryCommands::Add {
            name,
            quantity,
            unit,
            category,
            reorder_level,
            location,
        } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(FarmopsError::validation("Item name must not be empty"));
            }
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(FarmopsError::validation(format!(
                    "Quantity must be zero or more, got {quantity}"
                )));
            }
            if reorder_level.is_some_and(|l| !l.is_finite() || l < 0.0) {
                return Err(FarmopsError::validation("Reorder level must be zero or more"));
            }

            let store = ctx.open_store()?;
            let item = inventory_repo::create_item(&store, |id| InventoryItem {
                id,
                name,
                category,
                quantity,
                unit,
                reorder_level,
                location,
                extra: Default::default(),
            })?;
            tracing::info!(item_id = item.id, "inventory item added");

            if ctx.json {
                output::json::print(&output::json::success(json!({
                    "item": output::json::item_json(&item)
                })));
            } else {
                println!("Added item #{}: {} ({} {})", item.id, item.name, item.quantity, item.unit);
            }
            Ok(())
        }
        InventoryCommands::List { low } => {
            let store = ctx.open_store()?;
            let items = inventory_repo::list_items(&store)?;
            let shown: Vec<&InventoryItem> = items.iter().filter(|i| !low || i.is_low()).collect();
            if ctx.json {
                let list: Vec<_> = shown.iter().map(|i| output::json::item_json(i)).collect();
                output::json::print(&output::json::success(json!({
                    "items": list,
                    "count": shown.len()
                })));
            } else {
                output::text::print_item_list(&shown);
            }
            Ok(())
        }
        InventoryCommands::Adjust { id, delta } => {
            let store = ctx.open_store()?;
            let item = inventory_repo::adjust_item(&store, id, delta)?;
            tracing::info!(item_id = id, delta, quantity = item.quantity, "inventory adjusted");
            if item.is_low() {
                tracing::warn!(item_id = id, name = %item.name, "item at or below reorder level");
            }

            if ctx.json {
                output::json::print(&output::json::success(json!({
                    "item": output::json::item_json(&item)
                })));
            } else {
                println!(
                    "Item #{} {}: {} {}{}",
                    item.id,
                    item.name,
                    item.quantity,
                    item.unit,
                    if item.is_low() { " (low)" } else { "" }
                );
            }
            Ok(())
        }
    }
}
