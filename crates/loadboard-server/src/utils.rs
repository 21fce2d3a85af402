use loadboard_types::Result;
use tokio::task::spawn_blocking;

use crate::error::AppError;

/// Run blocking store work off the async runtime
pub async fn run_blocking<T, F>(work: F) -> std::result::Result<T, AppError>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .map_err(AppError::from)
}
