//! Farm and greenhouse operations: task scheduling and visibility, staff
//! assignment, inventory and growing-system capacity, backed by a directory
//! of JSON files.

pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod output;
pub mod schedule;
