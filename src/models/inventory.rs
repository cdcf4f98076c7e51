use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InventoryItem {
    pub fn is_low(&self) -> bool {
        self.reorder_level.is_some_and(|level| self.quantity <= level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowingSystem {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub occupied: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GrowingSystem {
    pub fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }

    /// Share of plant sites in use, 0–100.
    pub fn utilisation(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            f64::from(self.occupied) / f64::from(self.capacity) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_low_stock() {
        let mut item: InventoryItem = serde_json::from_value(json!({
            "id": 1, "name": "Rockwool cubes", "quantity": 40, "unit": "pcs", "reorderLevel": 50
        }))
        .unwrap();
        assert!(item.is_low());
        item.quantity = 51.0;
        assert!(!item.is_low());
        item.reorder_level = None;
        assert!(!item.is_low());
    }

    #[test]
    fn test_system_utilisation() {
        let system: GrowingSystem = serde_json::from_value(json!({
            "id": 2, "name": "NFT rack A", "capacity": 200, "occupied": "50"
        }))
        .unwrap();
        assert_eq!(system.free(), 150);
        assert!((system.utilisation() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unmodelled_fields_round_trip() {
        let item: InventoryItem = serde_json::from_value(json!({
            "id": 1, "name": "Perlite", "quantity": 3, "unit": "bags", "supplier": "Acme"
        }))
        .unwrap();
        let saved = serde_json::to_value(&item).unwrap();
        assert_eq!(saved["supplier"], "Acme");
        assert_eq!(saved["quantity"], 3.0);

        let system: GrowingSystem = serde_json::from_value(json!({
            "id": 2, "name": "DWC bay", "capacity": 12, "occupied": 0, "pumpModel": "P-40"
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&system).unwrap()["pumpModel"], "P-40");
    }
}
