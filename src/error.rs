use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    TaskNotFound,
    RecurringNotFound,
    StaffNotFound,
    InventoryNotFound,
    SystemNotFound,
    CapacityExceeded,
    ValidationError,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::RecurringNotFound => "RECURRING_NOT_FOUND",
            Self::StaffNotFound => "STAFF_NOT_FOUND",
            Self::InventoryNotFound => "INVENTORY_NOT_FOUND",
            Self::SystemNotFound => "SYSTEM_NOT_FOUND",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct FarmopsError {
    pub code: ErrorCode,
    pub message: String,
}

impl FarmopsError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized(dir: &str) -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            format!("No farm data found at {dir}. Run `farmops init` first."),
        )
    }

    pub fn task_not_found(id: u64) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {id}"))
    }

    pub fn recurring_not_found(id: u64) -> Self {
        Self::new(
            ErrorCode::RecurringNotFound,
            format!("Recurring task not found: {id}"),
        )
    }

    pub fn staff_not_found(id: &str) -> Self {
        Self::new(ErrorCode::StaffNotFound, format!("Staff member not found: {id}"))
    }

    pub fn inventory_not_found(id: u64) -> Self {
        Self::new(
            ErrorCode::InventoryNotFound,
            format!("Inventory item not found: {id}"),
        )
    }

    pub fn system_not_found(id: u64) -> Self {
        Self::new(
            ErrorCode::SystemNotFound,
            format!("Growing system not found: {id}"),
        )
    }

    pub fn capacity_exceeded(name: &str, free: u32, requested: u32) -> Self {
        Self::new(
            ErrorCode::CapacityExceeded,
            format!("Growing system '{name}' has {free} free sites, {requested} requested"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl From<std::io::Error> for FarmopsError {
    fn from(e: std::io::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<serde_json::Error> for FarmopsError {
    fn from(e: serde_json::Error) -> Self {
        Self::storage(e.to_string())
    }
}
