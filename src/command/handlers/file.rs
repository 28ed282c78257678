//! File creation handler

use super::HandlerContext;
use bytes::Bytes;
use futures::future::BoxFuture;
use ledger_executor_shared::{limits, ExecError};
use tracing::info;

/// Handle createFile(name)
///
/// The name argument must be present but is not used: the handler always
/// creates the configured fixed file in the work directory.
pub fn handle_create_file<'a>(
    ctx: &'a HandlerContext,
    _args: &'a [String],
) -> BoxFuture<'a, Result<Bytes, ExecError>> {
    Box::pin(async move {
        let path = ctx.config.created_file_path();

        let file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| ExecError::io("error creating file", e))?;
        drop(file);

        info!("[createFile] Created {}", path.display());
        Ok(Bytes::from_static(limits::CREATED_FILE_MESSAGE.as_bytes()))
    })
}
