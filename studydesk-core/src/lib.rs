//! Core types for the studydesk ecosystem.
//!
//! This crate provides shared types used by both studydesk-cli and remote providers:
//! - `Assignment` and `Habit` entities with their stores
//! - pure `project` and `export` transforms for painting and reports
//! - `remote::protocol` module for the CLI-provider communication protocol

pub mod assignment;
pub mod config;
pub mod desk;
pub mod durable;
pub mod error;
pub mod export;
pub mod habit;
pub mod project;
pub mod remote;
pub mod store;

// Re-export the everyday types at crate root for convenience
pub use assignment::{Assignment, Priority};
pub use error::{DeskError, DeskResult};
pub use habit::Habit;
