//! Command handlers, one per command

mod file;
mod http;
mod ledger;

pub use file::handle_create_file;
pub use http::handle_http_get;
pub use ledger::{handle_get_value, handle_set_value};

use crate::config::ExecutorConfig;
use crate::store::StateStore;
use crate::tasks::TaskRegistry;
use bytes::Bytes;
use futures::future::BoxFuture;
use ledger_executor_shared::ExecError;
use std::sync::Arc;

/// Signature every handler implements. Arguments are already arity-checked.
pub type HandlerFn =
    for<'a> fn(&'a HandlerContext, &'a [String]) -> BoxFuture<'a, Result<Bytes, ExecError>>;

/// Capabilities passed to command handlers
#[derive(Clone)]
pub struct HandlerContext {
    pub store: Arc<dyn StateStore>,
    pub tasks: TaskRegistry,
    pub http: reqwest::Client,
    pub config: Arc<ExecutorConfig>,
}

impl HandlerContext {
    pub fn new(store: Arc<dyn StateStore>, config: ExecutorConfig) -> Self {
        Self {
            store,
            tasks: TaskRegistry::new(),
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}
