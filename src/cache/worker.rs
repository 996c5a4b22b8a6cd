//! Asynchronous cache invalidation worker
//!
//! Write paths must not block on the cache, so invalidations are handed
//! to a single supervised worker task through a bounded channel. When the
//! queue is full the invalidation is dropped with a warning: the cache is
//! advisory, so a dropped invalidation costs staleness, never
//! correctness of the write itself. The worker exits once every queue
//! handle has
//! been dropped, so it cannot outlive the services that feed it.

use super::TimelineCache;
use crate::logger::Logger;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handle for enqueueing timeline invalidations
///
/// Cloning shares the same worker. Requests that were accepted keep
/// being processed even if the originating request is cancelled.
#[derive(Clone)]
pub struct InvalidationQueue {
    tx: mpsc::Sender<String>,
    logger: Arc<dyn Logger>,
}

impl InvalidationQueue {
    /// Spawn the worker task and return a handle to it
    pub fn spawn(
        cache: Arc<dyn TimelineCache>,
        logger: Arc<dyn Logger>,
        depth: usize,
    ) -> Self {
        // tokio panics on a zero-capacity channel
        let (tx, mut rx) = mpsc::channel::<String>(depth.max(1));

        let worker_logger = logger.clone();
        tokio::spawn(async move {
            while let Some(user_id) = rx.recv().await {
                if let Err(err) = cache.invalidate_timeline(&user_id) {
                    worker_logger.warn(
                        "failed to invalidate timeline cache",
                        &[
                            ("user_id", user_id.clone()),
                            ("error", err.to_string()),
                        ],
                    );
                }
            }
        });

        InvalidationQueue { tx, logger }
    }

    /// Enqueue an invalidation without blocking
    ///
    /// A full queue drops the request and logs at warn level.
    pub fn enqueue(&self, user_id: &str) {
        if self.tx.try_send(user_id.to_string()).is_err() {
            self.logger.warn(
                "invalidation queue full, dropping timeline invalidation",
                &[("user_id", user_id.to_string())],
            );
        }
    }
}
