//! Detached task infrastructure
//!
//! This module handles:
//! - Spawning background work the invoking path never joins
//! - Recording every spawn so it can be observed after the fact
//! - A bounded wait on a task's start phase for handlers that need one

mod registry;

pub use registry::{GraceOutcome, TaskRecord, TaskRegistry, TaskState};
