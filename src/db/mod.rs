pub mod config;
pub mod inventory_repo;
pub mod migrations;
pub mod recurring_repo;
pub mod staff_repo;
pub mod store;
pub mod task_repo;

pub use store::*;
