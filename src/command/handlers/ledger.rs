//! Ledger value handlers

use super::HandlerContext;
use bytes::Bytes;
use futures::future::BoxFuture;
use ledger_executor_shared::ExecError;
use tracing::{debug, warn};

/// Handle setValue(key, value): overwrite the record and echo the value
pub fn handle_set_value<'a>(
    ctx: &'a HandlerContext,
    args: &'a [String],
) -> BoxFuture<'a, Result<Bytes, ExecError>> {
    Box::pin(async move {
        let key = &args[0];
        let value = Bytes::from(args[1].clone());

        if let Err(e) = ctx.store.put(key, value.clone()).await {
            warn!("Store rejected write of {}: {:#}", key, e);
            return Err(ExecError::StoreWrite(key.clone()));
        }

        debug!("[setValue] {} updated ({} bytes)", key, value.len());
        Ok(value)
    })
}

/// Handle getValue(key): absent keys are NotFound, never an empty payload
pub fn handle_get_value<'a>(
    ctx: &'a HandlerContext,
    args: &'a [String],
) -> BoxFuture<'a, Result<Bytes, ExecError>> {
    Box::pin(async move {
        let key = &args[0];

        match ctx.store.get(key).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(ExecError::NotFound(key.clone())),
            Err(e) => Err(ExecError::StoreRead {
                key: key.clone(),
                reason: format!("{e:#}"),
            }),
        }
    })
}
