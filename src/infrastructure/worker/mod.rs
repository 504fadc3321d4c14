//! Worker Layer - Batch Synthesis
//!
//! 实现 BatchOrchestrator，按分组驱动片段合成

mod batch_orchestrator;

pub use batch_orchestrator::{
    BatchOrchestrator, BatchOrchestratorConfig, BatchOutcome, BatchReport,
};
