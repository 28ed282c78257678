//! Outbound HTTP GET handler

use super::HandlerContext;
use bytes::Bytes;
use futures::future::BoxFuture;
use ledger_executor_shared::ExecError;
use tracing::debug;

/// Handle http(url): GET the URL and return the whole body.
///
/// No size limit and no timeout of its own; the host's invocation budget is
/// the only bound.
pub fn handle_http_get<'a>(
    ctx: &'a HandlerContext,
    args: &'a [String],
) -> BoxFuture<'a, Result<Bytes, ExecError>> {
    Box::pin(async move {
        let url = &args[0];

        let response = ctx.http.get(url.as_str()).send().await.map_err(|e| ExecError::Http {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let status = response.status();

        let body = response
            .bytes()
            .await
            .map_err(|e| ExecError::Body(e.to_string()))?;

        debug!("[http] GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(body)
    })
}
