//! Data models for Hostel Hub

mod campus;
mod identity;
mod request;

pub use campus::*;
pub use identity::*;
pub use request::*;
