//! Tracking for background tasks polled from the frame loop.
//!
//! Requests run on the tokio runtime while egui keeps drawing frames. Each
//! frame calls `InFlight::drain_finished()` to collect the tasks that are
//! done, without ever blocking.

use futures::FutureExt;
use std::future::Future;
use tokio::task::{JoinError, JoinHandle};

/// Set of spawned tasks, each tagged with the request that started it
pub struct InFlight<K, T> {
    tasks: Vec<(K, JoinHandle<T>)>,
}

impl<K, T> Default for InFlight<K, T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<K, T: Send + 'static> InFlight<K, T> {
    /// Spawn `future` on the runtime and track it under `key`
    pub fn spawn<F>(&mut self, key: K, future: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.tasks.push((key, tokio::spawn(future)));
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove and return every finished task, in the order they were spawned.
    ///
    /// A `JoinError` means the task panicked or was aborted.
    pub fn drain_finished(&mut self) -> Vec<(K, Result<T, JoinError>)> {
        let mut finished = Vec::new();
        let mut i = 0;

        while i < self.tasks.len() {
            if !self.tasks[i].1.is_finished() {
                i += 1;
                continue;
            }

            match (&mut self.tasks[i].1).now_or_never() {
                Some(result) => {
                    let (key, _) = self.tasks.remove(i);
                    finished.push((key, result));
                }
                None => {
                    tracing::warn!("Task not ready despite is_finished()");
                    i += 1;
                }
            }
        }

        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drain_returns_only_finished() {
        let mut tasks: InFlight<&str, u32> = InFlight::default();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        tasks.spawn("fast", async { 1 });
        tasks.spawn("slow", async move {
            let _ = rx.await;
            2
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        let done = tasks.drain_finished();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].0, "fast");
        assert_eq!(*done[0].1.as_ref().unwrap(), 1);
        assert!(!tasks.is_empty());

        tx.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let done = tasks.drain_finished();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].0, "slow");
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_panicked_task_reports_join_error() {
        let mut tasks: InFlight<(), u32> = InFlight::default();
        tasks.spawn((), async {
            let value: Option<u32> = None;
            value.expect("boom")
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        let done = tasks.drain_finished();
        assert_eq!(done.len(), 1);
        assert!(done[0].1.as_ref().unwrap_err().is_panic());
    }
}
