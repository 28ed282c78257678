//! Command execution infrastructure
//!
//! This module handles:
//! - Mapping command names to handler descriptors (name, arity, function)
//! - Validating argument counts before any handler runs
//! - Dispatching to the handler and converting the outcome to a response

mod executor;
pub mod handlers;
mod registry;

pub use executor::CommandExecutor;
pub use handlers::{HandlerContext, HandlerFn};
pub use registry::{CommandRegistry, HandlerDescriptor};
