//! REST wire definitions for Taskboard client/backend communication
//!
//! This crate defines the JSON bodies exchanged with the Taskboard backend,
//! the endpoint paths, and the conventional shapes of error bodies.

mod endpoints;
mod error;
mod requests;
mod responses;

pub use endpoints::*;
pub use error::*;
pub use requests::*;
pub use responses::*;
