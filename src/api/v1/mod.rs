//! V1 API handlers.

mod habits;
mod system;


pub use habits::*;
pub use system::*;
