//! Ledger command executor
//!
//! Dispatches named invocations to handlers that either touch the key/value
//! ledger or perform a local side effect, and runs slow work on detached
//! tasks that the invocation never waits for.

pub mod command;
pub mod config;
pub mod store;
pub mod tasks;

pub use command::{CommandExecutor, CommandRegistry, HandlerContext, HandlerDescriptor};
pub use config::ExecutorConfig;
pub use store::{MemoryStore, StateStore};
pub use tasks::{GraceOutcome, TaskRecord, TaskRegistry, TaskState};
