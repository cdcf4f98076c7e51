use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "farmops",
    version = VERSION,
    about = "Farm and greenhouse operations: tasks, staff, stock and growing capacity",
    after_help = "\
NOTE:
  Data lives in a directory of JSON files (default ./farm-data).
  Run `farmops init` before any other command.

EXIT CODES:
  0  Success
  1  Error (missing data, validation, capacity, etc.)

ASSIGNMENT TAGS:
  all_staff        every active staff member
  user_<id>        one staff member
  role_<name>      every active staff member holding the role (exact match)

VISIBILITY:
  A task shows on a day inside [visible-from, due]. Without a window it
  shows on its due date only. Biweekly tasks with no stored window show for
  the 14 days ending on the due date. `--date today` also lists overdue work."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the farm's JSON data files
    #[arg(long, global = true, env = "FARMOPS_DATA_DIR", default_value = "farm-data")]
    pub data_dir: PathBuf,

    /// Act as this staff id (overrides `whoami --set`)
    #[arg(long, global = true, env = "FARMOPS_USER")]
    pub user: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today instead of the UTC clock
    #[arg(long, global = true, env = "FARMOPS_TODAY", hide = true)]
    pub today: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and empty data files
    Init,

    /// Show or set the staff member commands run as
    Whoami {
        /// Remember this staff id as the current user
        #[arg(long)]
        set: Option<String>,
        /// Forget the remembered user
        #[arg(long, conflicts_with = "set")]
        clear: bool,
    },

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Recurring task templates
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Staff roster
    #[command(subcommand)]
    Staff(StaffCommands),

    /// Inventory tracking
    #[command(subcommand)]
    Inventory(InventoryCommands),

    /// Growing systems and their plant-site capacity
    #[command(subcommand)]
    System(SystemCommands),

    /// One-off data repairs
    #[command(subcommand)]
    Repair(RepairCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Category, e.g. planting, harvest, maintenance
        #[arg(long = "type")]
        task_type: Option<String>,
        /// Due date (YYYY-MM-DD, today, tomorrow)
        #[arg(long)]
        due: Option<String>,
        /// First day the task is shown
        #[arg(long)]
        visible_from: Option<String>,
        /// Last day the task is meant to be shown (informational)
        #[arg(long)]
        visible_to: Option<String>,
        /// Frequency descriptor, e.g. weekly or Bi-Weekly
        #[arg(long)]
        frequency: Option<String>,
        /// Assignment tag: all_staff, user_<id> or role_<name>
        #[arg(long)]
        assign: Option<String>,
    },
    /// List tasks, optionally narrowed
    #[command(after_help = "\
NOTE:
  Filters combine with AND. `--type all` and `--priority all` disable those
  filters. `--status overdue` selects unfinished tasks due before today.")]
    List {
        /// Case-insensitive text in title or description
        #[arg(long)]
        search: Option<String>,
        /// Only tasks visible on this day (YYYY-MM-DD or today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "type")]
        task_type: Option<String>,
        /// pending, in_progress, completed, approved, overdue or all
        #[arg(long)]
        status: Option<String>,
        /// low, medium, high or all
        #[arg(long)]
        priority: Option<String>,
        /// Only tasks assigned to the current user
        #[arg(long)]
        mine: bool,
    },
    /// Show task details
    Show { id: u64 },
    /// Set a task's status (pending, in_progress, completed, approved)
    Status { id: u64, status: String },
    /// Change a task's assignment (`none` clears it)
    Assign { id: u64, tag: String },
    /// List the staff a task reaches
    Assignees { id: u64 },
    /// Delete a task
    Delete { id: u64 },
}

#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Add a recurring template
    Add {
        title: String,
        /// daily, weekly, biweekly or monthly
        #[arg(long)]
        frequency: String,
        /// First day of the schedule
        #[arg(long)]
        start: String,
        /// Last day of the schedule
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        assign: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long = "type")]
        task_type: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List templates
    List,
    /// Create the tasks active templates owe up to a date
    Generate {
        /// Generate through this day (default: today)
        #[arg(long)]
        through: Option<String>,
    },
    /// Delete a template (generated tasks are kept)
    Delete { id: u64 },
}

#[derive(Subcommand)]
pub enum StaffCommands {
    /// Add a staff member
    Add {
        email: String,
        full_name: String,
        /// Role held by the member (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Use this id instead of the next free number
        #[arg(long)]
        id: Option<String>,
    },
    /// List the roster
    List,
    /// Mark a staff member inactive
    Deactivate { id: String },
}

#[derive(Subcommand)]
pub enum InventoryCommands {
    /// Add an inventory item
    Add {
        name: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        unit: String,
        #[arg(long)]
        category: Option<String>,
        /// Quantity at or below which the item counts as low
        #[arg(long)]
        reorder_level: Option<f64>,
        #[arg(long)]
        location: Option<String>,
    },
    /// List items
    List {
        /// Only items at or below their reorder level
        #[arg(long)]
        low: bool,
    },
    /// Add to (positive) or draw from (negative) an item's stock
    Adjust {
        id: u64,
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },
}

#[derive(Subcommand)]
pub enum SystemCommands {
    /// Add a growing system
    Add {
        name: String,
        /// Number of plant sites
        #[arg(long)]
        capacity: u32,
        /// e.g. NFT, DWC, ebb-and-flow
        #[arg(long)]
        kind: Option<String>,
    },
    /// List systems with utilisation
    List,
    /// Fill plant sites
    Plant { id: u64, count: u32 },
    /// Free plant sites
    Harvest { id: u64, count: u32 },
}

#[derive(Subcommand)]
pub enum RepairCommands {
    /// Give unassigned generated tasks their template's assignment
    Assignments,
}
