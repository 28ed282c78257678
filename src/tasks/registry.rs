//! Task registry - spawns detached tasks and tracks what was spawned

use anyhow::Result;
use ledger_executor_shared::now_ms;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, RwLock};
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

/// Lifecycle of a detached task as seen by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Finished,
    Failed { reason: String },
}

/// A detached task that was spawned through the registry
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: u64,
    pub label: String,
    pub spawned_at: u64,
    pub state: TaskState,
}

/// What the invoking path learned about a task's start phase within the grace period
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraceOutcome {
    /// Start phase succeeded; the task is now running on its own
    Started,
    /// Start phase failed before the grace period ran out
    Failed(String),
    /// Start phase had not resolved when the grace period ran out
    Pending,
}

/// Spawns fire-and-forget tasks and keeps a record of each one.
///
/// Tasks have no result channel back to the invoker. Their errors are logged
/// and stored on the record, never returned to whoever spawned them.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    next_id: Arc<AtomicU64>,
    tasks: Arc<RwLock<HashMap<u64, TaskRecord>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `work` on the runtime and return immediately
    pub async fn spawn<F>(&self, label: impl Into<String>, work: F) -> u64
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let id = self.register(label.into()).await;
        let tasks = self.tasks.clone();

        tokio::spawn(async move {
            let result = work.await;
            Self::settle(&tasks, id, result).await;
        });

        id
    }

    /// Spawn a task with a start phase and wait at most `grace` for it to resolve.
    ///
    /// The caller always waits the full `grace` before returning, whatever the
    /// start phase does. The outcome reflects the start phase only; `run` keeps
    /// going in the background after a successful start.
    pub async fn spawn_with_grace<T, S, R, Fut>(
        &self,
        label: impl Into<String>,
        grace: Duration,
        start: S,
        run: R,
    ) -> GraceOutcome
    where
        T: Send + 'static,
        S: Future<Output = Result<T>> + Send + 'static,
        R: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let deadline = Instant::now() + grace;
        let id = self.register(label.into()).await;
        let tasks = self.tasks.clone();
        let (started_tx, started_rx) = oneshot::channel::<std::result::Result<(), String>>();

        tokio::spawn(async move {
            match start.await {
                Ok(value) => {
                    // Receiver may be gone if the grace period already ran out
                    let _ = started_tx.send(Ok(()));
                    let result = run(value).await;
                    Self::settle(&tasks, id, result).await;
                }
                Err(e) => {
                    let _ = started_tx.send(Err(format!("{e:#}")));
                    Self::settle(&tasks, id, Err(e)).await;
                }
            }
        });

        let outcome = match timeout(grace, started_rx).await {
            Ok(Ok(Ok(()))) => GraceOutcome::Started,
            Ok(Ok(Err(reason))) => GraceOutcome::Failed(reason),
            Ok(Err(_)) => GraceOutcome::Failed("task exited before reporting".into()),
            Err(_) => GraceOutcome::Pending,
        };

        tokio::time::sleep_until(deadline).await;
        outcome
    }

    /// Snapshot of one task record
    pub async fn get(&self, id: u64) -> Option<TaskRecord> {
        self.tasks.read().await.get(&id).cloned()
    }

    /// Snapshot of all records, ordered by id
    pub async fn snapshot(&self) -> Vec<TaskRecord> {
        let mut records: Vec<TaskRecord> = self.tasks.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }

    /// Total number of tasks ever spawned
    pub async fn count(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Number of tasks still running
    pub async fn running_count(&self) -> usize {
        self.tasks
            .read()
            .await
            .values()
            .filter(|r| r.state == TaskState::Running)
            .count()
    }

    async fn register(&self, label: String) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Spawning detached task {} ({})", id, label);

        self.tasks.write().await.insert(
            id,
            TaskRecord {
                id,
                label,
                spawned_at: now_ms(),
                state: TaskState::Running,
            },
        );
        id
    }

    async fn settle(tasks: &RwLock<HashMap<u64, TaskRecord>>, id: u64, result: Result<()>) {
        let state = match result {
            Ok(()) => {
                debug!("Detached task {} finished", id);
                TaskState::Finished
            }
            Err(e) => {
                warn!("Detached task {} failed: {:#}", id, e);
                TaskState::Failed {
                    reason: format!("{e:#}"),
                }
            }
        };

        if let Some(record) = tasks.write().await.get_mut(&id) {
            record.state = state;
        }
    }
}
