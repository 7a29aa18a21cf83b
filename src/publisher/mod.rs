//! Upload contract implemented by every provider.
//!
//! A [`Publisher`] uploads one artifact per [`Publisher::upload`] call.
//! [`HttpPublisher`] implements the contract on top of a provider
//! [`Transport`] and is the usual starting point for new providers.

mod http;
pub mod pipeline;

pub use http::{HttpPublisher, RequestProcessor, Transport, UploadTask};
pub use pipeline::ByteStream;

use crate::arch::Arch;
use crate::context::PublishContext;
use crate::error::Result;
use crate::progress::ProgressBar;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Uploads artifacts to one provider.
///
/// `Display` is the human readable identity used in log lines.
#[async_trait]
pub trait Publisher: fmt::Display + Send + Sync {
    /// Provider specific result of an upload
    type Output: Send;

    /// Short stable provider identifier, used for display only
    fn provider_name(&self) -> &str;

    /// Run-wide context this publisher was created with
    fn context(&self) -> &PublishContext;

    /// Upload `file` built for `arch`.
    ///
    /// Resolves once the artifact is fully transmitted to the provider.
    async fn upload(
        &self,
        file: &Path,
        arch: Arch,
        safe_artifact_name: Option<&str>,
    ) -> Result<Self::Output>;

    /// Create the progress bar of one logical upload, see
    /// [`pipeline::create_progress_bar`]
    fn create_progress_bar(&self, file_name: &str, file_size: u64) -> Option<Arc<dyn ProgressBar>> {
        pipeline::create_progress_bar(self.context(), self.provider_name(), file_name, file_size)
    }

    /// Open `file` for one attempt, counted into `progress_bar` when given
    async fn create_read_stream_and_progress_bar(
        &self,
        file: &Path,
        file_size: u64,
        progress_bar: Option<Arc<dyn ProgressBar>>,
    ) -> Result<ByteStream> {
        pipeline::open_read_stream(
            file,
            file_size,
            progress_bar,
            &self.context().cancellation_token,
        )
        .await
    }
}
