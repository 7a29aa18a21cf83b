//! Run-wide state shared by every publisher.

use crate::progress::ProgressContainer;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared, read-only state of one publish run
#[derive(Clone, Default)]
pub struct PublishContext {
    /// Cancels every in-flight upload of the run
    pub cancellation_token: CancellationToken,
    /// Visual progress, `None` falls back to log lines
    pub progress: Option<Arc<dyn ProgressContainer>>,
}

impl PublishContext {
    /// Context without visual progress
    pub fn new(cancellation_token: CancellationToken) -> Self {
        Self {
            cancellation_token,
            progress: None,
        }
    }

    /// Attach a progress container
    pub fn with_progress(mut self, progress: Arc<dyn ProgressContainer>) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl fmt::Debug for PublishContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishContext")
            .field("cancelled", &self.cancellation_token.is_cancelled())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}
