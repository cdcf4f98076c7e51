//! Task scheduling rules: which day a task shows on, who it belongs to, and
//! how a task list is narrowed for a view.
//!
//! Everything here is pure. Callers hand in a snapshot of records and get
//! back a verdict or a filtered view; nothing is mutated or persisted.

pub mod assignment;
pub mod date;
pub mod filter;
pub mod recurrence;
pub mod visibility;

pub use assignment::{assigned_staff_ids, is_assigned_to};
pub use date::{same_day, to_comparison_key, DateLike};
pub use filter::{assigned_to_user, filter, is_overdue, FilterCriteria, StatusFilter};
pub use visibility::{is_visible_on, normalize_frequency};
