//! Bounded fan-out of blocking lookups.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("warehouse: {0}")]
    Warehouse(#[from] shredcap_io::Error),
    #[error(transparent)]
    Core(#[from] shredcap_core::Error),
    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("failed to initialize async runtime: {0}")]
    Runtime(String),
}

/// Run `fetch` over `items` with at most `parallelism` calls in flight.
///
/// Results come back in input order once every task has finished. The first
/// error aborts the tasks still queued and is returned.
pub async fn fetch_all<T, R, F>(
    items: Vec<T>,
    parallelism: usize,
    fetch: F,
) -> Result<Vec<R>, FetchError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> shredcap_io::Result<R> + Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
    let fetch = Arc::new(fetch);
    let mut slots: Vec<Option<R>> = Vec::with_capacity(items.len());
    let mut tasks = JoinSet::new();

    for (idx, item) in items.into_iter().enumerate() {
        slots.push(None);
        let semaphore = Arc::clone(&semaphore);
        let fetch = Arc::clone(&fetch);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| FetchError::Runtime(e.to_string()))?;
            let result = tokio::task::spawn_blocking(move || (*fetch)(item)).await??;
            Ok::<_, FetchError>((idx, result))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok((idx, value))) => slots[idx] = Some(value),
            Ok(Err(e)) => {
                tasks.abort_all();
                return Err(e);
            }
            Err(e) => {
                tasks.abort_all();
                return Err(e.into());
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}
