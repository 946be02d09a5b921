//! Request storage for Hostel Hub

mod memory;
mod traits;

pub use memory::InMemoryRequestStore;
pub use traits::{RequestRepository, StatusCounts};
