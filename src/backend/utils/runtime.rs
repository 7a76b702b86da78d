//! Process-wide tokio runtime.

use std::sync::OnceLock;
use tokio::runtime::{Handle, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Returns the current runtime handle, or the shared fallback runtime when
/// called from outside one (e.g. from the UI thread).
pub fn handle() -> Handle {
    Handle::try_current().unwrap_or_else(|_| {
        RUNTIME
            .get_or_init(|| {
                tokio::runtime::Builder::new_multi_thread()
                    .thread_name("splinx-worker")
                    .enable_all()
                    .build()
                    .unwrap_or_else(|e| panic!("Failed to create runtime: {e}"))
            })
            .handle()
            .clone()
    })
}

/// Runs `future` on the tokio runtime and awaits it from any executor.
/// HTTP calls made from UI event handlers go through here.
pub async fn run<F>(future: F) -> anyhow::Result<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    handle()
        .spawn(future)
        .await
        .map_err(|e| anyhow::anyhow!("Background task failed: {e}"))
}
