//! Command executor - validates and dispatches incoming invocations

use super::handlers::HandlerContext;
use super::registry::CommandRegistry;
use crate::config::ExecutorConfig;
use crate::store::StateStore;
use crate::tasks::TaskRegistry;
use bytes::Bytes;
use ledger_executor_shared::{now_ms, ExecError, Invocation, Response};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes invocations against the registered handlers
pub struct CommandExecutor {
    registry: CommandRegistry,
    ctx: HandlerContext,
}

impl CommandExecutor {
    /// Create an executor with the standard command set
    pub fn new(store: Arc<dyn StateStore>, config: ExecutorConfig) -> Self {
        Self::with_registry(CommandRegistry::standard(), HandlerContext::new(store, config))
    }

    /// Create an executor from an explicit registry and context
    pub fn with_registry(registry: CommandRegistry, ctx: HandlerContext) -> Self {
        Self { registry, ctx }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Detached tasks spawned by handlers of this executor
    pub fn tasks(&self) -> &TaskRegistry {
        &self.ctx.tasks
    }

    /// Seed the ledger with one key/value pair when the contract is instantiated
    pub async fn init(&self, args: &[String]) -> Response {
        if args.len() != 2 {
            return Response::error("wrong arguments. Need key and value.");
        }

        match self.ctx.store.put(&args[0], Bytes::from(args[1].clone())).await {
            Ok(()) => {
                info!("Ledger initialized with {}", args[0]);
                Response::success(Bytes::new())
            }
            Err(e) => {
                warn!("Init write failed: {:#}", e);
                Response::error(format!("error initializing the chaincode: {}", args[0]))
            }
        }
    }

    /// Execute an invocation and translate the outcome into a response
    pub async fn execute(&self, invocation: &Invocation) -> Response {
        let start_time = now_ms();
        debug!(
            "Executing command: {} ({} args)",
            invocation.command,
            invocation.args.len()
        );

        let result = self.dispatch(invocation).await;
        let processing_time = now_ms() - start_time;

        match &result {
            Ok(payload) => info!(
                "Command {} completed in {}ms ({} bytes)",
                invocation.command,
                processing_time,
                payload.len()
            ),
            Err(e) if e.is_validation() => warn!("Command {} rejected: {}", invocation.command, e),
            Err(e) => warn!("Command {} failed: {}", invocation.command, e),
        }

        result.into()
    }

    /// Look up, arity-check and run the handler. Attempted exactly once.
    pub async fn dispatch(&self, invocation: &Invocation) -> Result<Bytes, ExecError> {
        let descriptor = self
            .registry
            .get(&invocation.command)
            .ok_or_else(|| ExecError::UnknownCommand(invocation.command.clone()))?;

        if invocation.args.len() != descriptor.arity {
            return Err(ExecError::Arity {
                command: descriptor.name.to_string(),
                expected: descriptor.arity,
                got: invocation.args.len(),
            });
        }

        (descriptor.handler)(&self.ctx, &invocation.args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use futures::future::BoxFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn executor_in(dir: &std::path::Path) -> (CommandExecutor, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let config = ExecutorConfig {
            work_dir: dir.to_path_buf(),
            ..Default::default()
        };
        (CommandExecutor::new(store.clone(), config), store)
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, _) = executor_in(dir.path());

        let set = executor.execute(&Invocation::new("setValue", ["color", "blue"])).await;
        assert_eq!(set, Response::success("blue"));

        let get = executor.execute(&Invocation::new("getValue", ["color"])).await;
        assert_eq!(get, Response::success("blue"));
    }

    #[tokio::test]
    async fn test_get_unset_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, _) = executor_in(dir.path());

        let response = executor.execute(&Invocation::new("getValue", ["nope"])).await;
        assert_eq!(response.error_message(), Some("key not found: nope"));
    }

    #[tokio::test]
    async fn test_wrong_arity_has_no_side_effect() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, store) = executor_in(dir.path());

        for descriptor in executor.registry().descriptors() {
            for count in [descriptor.arity.saturating_sub(1), descriptor.arity + 1] {
                if count == descriptor.arity {
                    continue;
                }
                let args: Vec<String> = (0..count).map(|i| format!("arg{}", i)).collect();
                let invocation = Invocation::new(descriptor.name, args);

                let err = executor.dispatch(&invocation).await.unwrap_err();
                assert!(
                    matches!(err, ExecError::Arity { expected, got, .. }
                        if expected == descriptor.arity && got == count),
                    "{}: {}",
                    descriptor.name,
                    err
                );
            }
        }

        assert!(store.is_empty().await);
        assert!(!dir.path().join("test-file").exists());
        assert_eq!(executor.tasks().count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_command_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, store) = executor_in(dir.path());

        for name in ["deleteValue", "shell", "ssh", "httpDrop", "httpExfil", ""] {
            let response = executor.execute(&Invocation::new(name, ["x"])).await;
            assert_eq!(
                response.error_message(),
                Some(format!("wrong invoke method: {}", name).as_str())
            );
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_file_through_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, _) = executor_in(dir.path());

        let response = executor.execute(&Invocation::new("createFile", ["ignored"])).await;
        assert_eq!(response, Response::success("successfully created a file"));
        assert!(dir.path().join("test-file").exists());
    }

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn failing_handler<'a>(
        _ctx: &'a HandlerContext,
        _args: &'a [String],
    ) -> BoxFuture<'a, Result<Bytes, ExecError>> {
        Box::pin(async {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Err(ExecError::Body("stream reset".into()))
        })
    }

    #[tokio::test]
    async fn test_handler_error_is_verbatim_and_not_retried() {
        let mut registry = CommandRegistry::new();
        registry.register("flaky", 0, failing_handler);
        let ctx = HandlerContext::new(Arc::new(MemoryStore::new()), ExecutorConfig::default());
        let executor = CommandExecutor::with_registry(registry, ctx);

        let response = executor.execute(&Invocation::new("flaky", Vec::<String>::new())).await;

        assert_eq!(response.error_message(), Some("error reading body: stream reset"));
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_init_seeds_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, store) = executor_in(dir.path());

        let response = executor.init(&["a".to_string(), "100".to_string()]).await;
        assert_eq!(response, Response::success(Bytes::new()));
        assert_eq!(store.get("a").await.unwrap(), Some(Bytes::from_static(b"100")));

        let response = executor.init(&["a".to_string()]).await;
        assert_eq!(response.error_message(), Some("wrong arguments. Need key and value."));
    }
}
