use super::FetchFuture;
use crate::error::LoadError;
use futures::channel::oneshot;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Runs blocking reads off the polling thread
#[derive(Clone)]
pub(crate) struct IoPool {
    thread_pool: Arc<ThreadPool>,
}

impl IoPool {
    pub fn new(threads: usize) -> Result<Self, LoadError> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("loadkit-io-{idx}"))
            // a panicking job drops its sender, the receiver reports it as a fetch error
            .panic_handler(|_| log::error!("Loader io thread panicked"))
            .build()
            .map_err(|e| LoadError::Init(e.to_string()))?;

        Ok(Self {
            thread_pool: Arc::new(thread_pool),
        })
    }

    pub fn run<F>(&self, locator: &str, job: F) -> FetchFuture
    where
        F: FnOnce() -> Result<Vec<u8>, LoadError> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.thread_pool.spawn(move || {
            let _ = tx.send(job());
        });

        let locator = locator.to_owned();
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(LoadError::fetch(&locator, "The channel was dropped.")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_run_returns_job_result() {
        let pool = IoPool::new(1).unwrap();
        let res = block_on(pool.run("mem", || Ok(vec![1, 2, 3])));
        assert_eq!(res, Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_panicking_job_is_a_fetch_error() {
        let pool = IoPool::new(1).unwrap();
        let res = block_on(pool.run("boom", || panic!("io thread panic")));
        assert!(matches!(res, Err(LoadError::Fetch { ref locator, .. }) if locator == "boom"));
    }
}
