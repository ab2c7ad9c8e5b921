//! Project and task state for Taskboard clients.
//!
//! [`ProjectStore`] keeps the signed-in user's projects, each with its tasks
//! embedded, and derives progress figures from them. The system of record is
//! a [`ProjectBackend`]: the REST API through `api_client::ApiClient`, or
//! [`MemoryProjectBackend`] when working offline.

mod api;
mod error;
mod memory;
mod seed;
mod store;
mod traits;

pub use error::*;
pub use memory::*;
pub use seed::*;
pub use store::*;
pub use traits::*;
