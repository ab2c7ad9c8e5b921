//! Core entity definitions for Taskboard.
//!
//! This crate defines the data types shared by the client crates: the
//! signed-in user, projects with their embedded tasks, and the progress
//! figures derived from them.

mod progress;
mod project;
mod task;
mod user;

pub use progress::*;
pub use project::*;
pub use task::*;
pub use user::*;
