use crate::error::FarmopsError;
use crate::models::{GrowingSystem, InventoryItem};

use super::store::{Collection, Store, INVENTORY_FILE, SYSTEMS_FILE};

pub fn list_items(store: &Store) -> Result<Vec<InventoryItem>, FarmopsError> {
    store.load(INVENTORY_FILE)
}

pub fn create_item<F>(store: &Store, build: F) -> Result<InventoryItem, FarmopsError>
where
    F: FnOnce(u64) -> InventoryItem,
{
    let mut items = list_items(store)?;
    let max = items.iter().map(|i| i.id).max().unwrap_or(0);
    let id = store.next_id(Collection::Inventory, max)?;
    let item = build(id);
    items.push(item.clone());
    store.save(INVENTORY_FILE, &items)?;
    Ok(item)
}

/// Changes an item's quantity by `delta`. Stock never goes negative.
pub fn adjust_item(store: &Store, id: u64, delta: f64) -> Result<InventoryItem, FarmopsError> {
    let mut items = list_items(store)?;
    let item = items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| FarmopsError::inventory_not_found(id))?;
    let quantity = item.quantity + delta;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(FarmopsError::validation(format!(
            "Cannot adjust '{}' by {delta}: only {} {} in stock",
            item.name, item.quantity, item.unit
        )));
    }
    item.quantity = quantity;
    let updated = item.clone();
    store.save(INVENTORY_FILE, &items)?;
    Ok(updated)
}

pub fn list_systems(store: &Store) -> Result<Vec<GrowingSystem>, FarmopsError> {
    store.load(SYSTEMS_FILE)
}

pub fn create_system<F>(store: &Store, build: F) -> Result<GrowingSystem, FarmopsError>
where
    F: FnOnce(u64) -> GrowingSystem,
{
    let mut systems = list_systems(store)?;
    let max = systems.iter().map(|s| s.id).max().unwrap_or(0);
    let id = store.next_id(Collection::GrowingSystem, max)?;
    let system = build(id);
    systems.push(system.clone());
    store.save(SYSTEMS_FILE, &systems)?;
    Ok(system)
}

/// Plants (`delta > 0`) or clears (`delta < 0`) sites in a growing system.
pub fn occupy_sites(store: &Store, id: u64, delta: i64) -> Result<GrowingSystem, FarmopsError> {
    let mut systems = list_systems(store)?;
    let system = systems
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| FarmopsError::system_not_found(id))?;

    let occupied = i64::from(system.occupied) + delta;
    if occupied < 0 {
        return Err(FarmopsError::validation(format!(
            "Growing system '{}' only has {} occupied sites",
            system.name, system.occupied
        )));
    }
    if occupied > i64::from(system.capacity) {
        let requested = u32::try_from(delta).unwrap_or(u32::MAX);
        return Err(FarmopsError::capacity_exceeded(&system.name, system.free(), requested));
    }
    system.occupied = u32::try_from(occupied)
        .map_err(|_| FarmopsError::validation("Occupied sites out of range"))?;
    let updated = system.clone();
    store.save(SYSTEMS_FILE, &systems)?;
    Ok(updated)
}
