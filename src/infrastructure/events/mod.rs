//! Events - 进程内事件广播

mod publisher;

pub use publisher::{EventPublisher, StudioEvent};
