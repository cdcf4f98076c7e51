pub mod assignment;
pub mod inventory;
pub mod lenient;
pub mod recurring;
pub mod staff;
pub mod task;

pub use assignment::*;
pub use inventory::*;
pub use recurring::*;
pub use staff::*;
pub use task::*;
