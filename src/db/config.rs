use serde::{Deserialize, Serialize};

use crate::error::FarmopsError;
use crate::models::StaffId;

use super::store::{Store, CONFIG_FILE};

/// Settings persisted next to the data files.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<StaffId>,
}

pub fn load_config(store: &Store) -> Result<Config, FarmopsError> {
    let Some(document) = store.read_document(CONFIG_FILE)? else {
        return Ok(Config::default());
    };
    match serde_json::from_value(document) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config.json");
            Ok(Config::default())
        }
    }
}

pub fn save_config(store: &Store, config: &Config) -> Result<(), FarmopsError> {
    store.write_document(CONFIG_FILE, config)
}
