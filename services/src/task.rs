//! Owned handle for a spawned background task.

use std::future::Future;

use tokio::task::JoinHandle;

/// A tokio task that is aborted when its handle goes away.
///
/// Background work (the expiry sweep, an in-flight holiday fetch) lives
/// exactly as long as the component holding this handle.
#[derive(Debug)]
pub struct BackgroundTask {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundTask {
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!("Spawning background task '{}'", name);
        Self {
            name,
            handle: Some(tokio::spawn(future)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    pub fn abort(mut self) {
        self.stop();
    }

    /// Wait for the task to run to completion.
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!("Background task '{}' failed: {:?}", self.name, e);
                }
            }
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                tracing::debug!("Aborting background task '{}'", self.name);
            }
            handle.abort();
        }
    }
}

impl Drop for BackgroundTask {
    fn drop(&mut self) {
        self.stop();
    }
}
