//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod archive;
pub mod storage;
pub mod tts;

pub use archive::*;
pub use storage::*;
pub use tts::*;
