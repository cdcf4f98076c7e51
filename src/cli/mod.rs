pub mod commands;
pub mod init;
pub mod inventory;
pub mod recurring;
pub mod repair;
pub mod staff;
pub mod system;
pub mod task;
pub mod whoami;

pub use commands::*;

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};

use crate::db::{config, Store};
use crate::error::FarmopsError;
use crate::models::{Assignment, CurrentUser, Priority, StaffId, StaffMember};
use crate::output;
use crate::schedule::date::{parse_day, to_comparison_key};

/// Settings shared by every command, taken from the global flags.
pub struct Context {
    pub json: bool,
    pub data_dir: PathBuf,
    pub user: Option<String>,
    pub today: NaiveDate,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, FarmopsError> {
        let clock_today = Utc::now().date_naive();
        let today = match cli.today.as_deref() {
            None => clock_today,
            Some(raw) => parse_day(raw, clock_today)
                .ok_or_else(|| FarmopsError::validation(format!("Invalid --today date: {raw}")))?,
        };
        Ok(Self {
            json: cli.json,
            data_dir: cli.data_dir.clone(),
            user: cli.user.clone(),
            today,
        })
    }

    pub fn open_store(&self) -> Result<Store, FarmopsError> {
        Store::open(self.data_dir.clone())
    }

    pub fn today_key(&self) -> String {
        to_comparison_key(&self.today)
    }

    /// Reads a day argument into its stored `YYYY-MM-DD` form.
    pub fn day(&self, raw: &str, what: &str) -> Result<String, FarmopsError> {
        parse_day(raw, self.today)
            .map(|d| to_comparison_key(&d))
            .ok_or_else(|| FarmopsError::validation(format!("Invalid {what} date: {raw}")))
    }

    /// The signed-in user: `--user` first, then `whoami --set`. An id that
    /// is not on the roster, or an inactive member, runs as anonymous.
    pub fn current_user(&self, store: &Store, roster: &[StaffMember]) -> Result<CurrentUser, FarmopsError> {
        let id = match self.user.as_deref() {
            Some(raw) => Some(StaffId::new(raw)),
            None => config::load_config(store)?.current_user,
        };
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Ok(CurrentUser::anonymous());
        };
        match roster.iter().find(|s| s.id == id) {
            Some(member) if member.active => Ok(CurrentUser::from(member)),
            Some(_) => {
                tracing::warn!(user = %id, "staff member is inactive, running as anonymous");
                Ok(CurrentUser::anonymous())
            }
            None => {
                tracing::warn!(user = %id, "unknown staff id, running as anonymous");
                Ok(CurrentUser::anonymous())
            }
        }
    }
}

/// Parses an assignment given on the command line. Unlike stored data,
/// input in none of the known forms is rejected, and a `user_` target must
/// be on the roster.
pub fn parse_assignment(raw: &str, roster: &[StaffMember]) -> Result<Assignment, FarmopsError> {
    if raw.trim().eq_ignore_ascii_case("none") {
        return Ok(Assignment::Unassigned);
    }
    match Assignment::parse(raw) {
        Assignment::Unrecognized(tag) => Err(FarmopsError::validation(format!(
            "Invalid assignment '{tag}': use all_staff, user_<id> or role_<name>"
        ))),
        Assignment::User(id) if !roster.iter().any(|s| s.id == id) => {
            Err(FarmopsError::staff_not_found(id.as_str()))
        }
        other => Ok(other),
    }
}

pub fn parse_priority(raw: Option<&str>) -> Result<Option<Priority>, FarmopsError> {
    match raw {
        None => Ok(None),
        Some(s) => Priority::from_str(s)
            .map(Some)
            .ok_or_else(|| FarmopsError::validation(format!("Invalid priority: {s} (low, medium, high)"))),
    }
}

/// Timestamp written into `createdAt`/`updatedAt`.
pub fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Turns a command result into an exit code, printing any error in the
/// requested format.
pub fn finish(result: Result<(), FarmopsError>, json_output: bool) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(code = e.code.as_str(), message = %e.message, "command failed");
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

pub fn run(cli: Cli) -> i32 {
    let json_output = cli.json;
    let ctx = match Context::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => return finish(Err(e), json_output),
    };

    let result = match cli.command {
        Commands::Init => init::run(&ctx),
        Commands::Whoami { set, clear } => whoami::run(&ctx, set.as_deref(), clear),
        Commands::Task(cmd) => task::run(&ctx, cmd),
        Commands::Recurring(cmd) => recurring::run(&ctx, cmd),
        Commands::Staff(cmd) => staff::run(&ctx, cmd),
        Commands::Inventory(cmd) => inventory::run(&ctx, cmd),
        Commands::System(cmd) => system::run(&ctx, cmd),
        Commands::Repair(cmd) => repair::run(&ctx, cmd),
    };
    finish(result, json_output)
}
