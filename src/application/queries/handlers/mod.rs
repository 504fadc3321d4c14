//! Query Handlers 实现

mod segment_handlers;
mod voice_handlers;

pub use segment_handlers::*;
pub use voice_handlers::*;
