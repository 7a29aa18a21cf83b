//! Publisher over a provider supplied transport.

use super::Publisher;
use super::pipeline::{self, ByteStream};
use crate::arch::Arch;
use crate::context::PublishContext;
use crate::error::{PublishError, Result};
use crate::progress::ProgressBar;
use async_trait::async_trait;
use bytes::Bytes;
use futures_lite::stream;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

/// Network transport of one provider.
///
/// `do_upload` owns the retry loop. It must go through
/// [`UploadTask::request_processor`] exactly once per physical attempt, so the
/// progress bar is reset before each attempt starts streaming.
#[async_trait]
pub trait Transport: fmt::Display + Send + Sync {
    /// Provider specific result of an upload
    type Output: Send;

    /// Short stable provider identifier
    fn provider_name(&self) -> &str;

    /// Transmit one artifact
    async fn do_upload(&self, task: UploadTask<'_>) -> Result<Self::Output>;
}

/// Everything a transport needs for one logical upload
#[derive(Debug, Clone, Copy)]
pub struct UploadTask<'a> {
    /// Name the artifact is published under
    pub file_name: &'a str,
    /// Architecture the artifact was built for
    pub arch: Arch,
    /// Payload size in bytes
    pub data_length: u64,
    /// Produces the payload of each attempt
    pub request_processor: &'a RequestProcessor,
    /// Source file, `None` for in-memory payloads
    pub file: Option<&'a Path>,
}

enum Payload {
    File {
        path: PathBuf,
        size: u64,
        progress_bar: Option<Arc<dyn ProgressBar>>,
        cancellation_token: CancellationToken,
    },
    Data(Bytes),
}

/// Builds the payload of every attempt of one logical upload.
///
/// Each call to [`open`](Self::open), [`process`](Self::process) or
/// [`body`](Self::body) starts a new attempt: the progress bar goes back to
/// zero and a fresh file stream is opened.
pub struct RequestProcessor {
    payload: Payload,
    attempts: AtomicUsize,
}

impl RequestProcessor {
    fn for_file(
        path: PathBuf,
        size: u64,
        progress_bar: Option<Arc<dyn ProgressBar>>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            payload: Payload::File {
                path,
                size,
                progress_bar,
                cancellation_token,
            },
            attempts: AtomicUsize::new(0),
        }
    }

    fn for_data(data: Bytes) -> Self {
        Self {
            payload: Payload::Data(data),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Number of attempts started so far
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn begin_attempt(&self) {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.payload {
            Payload::File {
                path, progress_bar, ..
            } => {
                log::debug!("Upload attempt {} for {}", attempt, path.display());
                if let Some(bar) = progress_bar {
                    bar.update(0);
                }
            }
            Payload::Data(data) => {
                log::debug!("Upload attempt {} for {} in-memory bytes", attempt, data.len());
            }
        }
    }

    /// Start an attempt and return its byte stream
    pub async fn open(&self) -> Result<ByteStream> {
        self.begin_attempt();
        match &self.payload {
            Payload::File {
                path,
                size,
                progress_bar,
                cancellation_token,
            } => {
                pipeline::open_read_stream(path, *size, progress_bar.clone(), cancellation_token)
                    .await
            }
            Payload::Data(data) => Ok(Box::pin(stream::once(Ok::<_, std::io::Error>(
                data.clone(),
            )))),
        }
    }

    /// Start an attempt and write its payload into `sink`.
    ///
    /// Returns the number of bytes written. Read errors and cancellation end
    /// the attempt with an error.
    pub async fn process<W>(&self, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        match &self.payload {
            Payload::File { .. } => {
                let stream = self.open().await?;
                pipeline::pipe_to_sink(stream, sink).await
            }
            Payload::Data(data) => {
                self.begin_attempt();
                sink.write_all(data).await?;
                sink.shutdown().await?;
                Ok(data.len() as u64)
            }
        }
    }

    /// Start an attempt and wrap its payload into a request body.
    ///
    /// Errors the body reports while sending (cancellation included) come back
    /// through `PublishError::from(reqwest::Error)` with their stream
    /// classification, so `send().await?` yields [`PublishError::Cancelled`].
    pub async fn body(&self) -> Result<reqwest::Body> {
        match &self.payload {
            Payload::File { .. } => Ok(reqwest::Body::wrap_stream(self.open().await?)),
            Payload::Data(data) => {
                self.begin_attempt();
                Ok(reqwest::Body::from(data.clone()))
            }
        }
    }
}

impl fmt::Debug for RequestProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RequestProcessor");
        match &self.payload {
            Payload::File {
                path,
                size,
                progress_bar,
                ..
            } => s
                .field("file", path)
                .field("size", size)
                .field("progress_bar", &progress_bar.is_some()),
            Payload::Data(data) => s.field("data_len", &data.len()),
        };
        s.field("attempts", &self.attempts()).finish()
    }
}

/// [`Publisher`] that streams artifacts through a provider [`Transport`]
pub struct HttpPublisher<T> {
    context: PublishContext,
    transport: T,
    use_safe_artifact_name: bool,
}

impl<T: Transport> HttpPublisher<T> {
    /// Create a publisher for `transport`
    pub fn new(context: PublishContext, transport: T) -> Self {
        Self {
            context,
            transport,
            use_safe_artifact_name: false,
        }
    }

    /// Publish under the caller supplied safe artifact name when one is given
    pub fn with_safe_artifact_name(mut self, use_safe_artifact_name: bool) -> Self {
        self.use_safe_artifact_name = use_safe_artifact_name;
        self
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Name an artifact is published under
    pub fn resolve_file_name(
        &self,
        file: &Path,
        safe_artifact_name: Option<&str>,
    ) -> Result<String> {
        if self.use_safe_artifact_name
            && let Some(name) = safe_artifact_name.filter(|name| !name.is_empty())
        {
            return Ok(name.to_string());
        }

        file.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                PublishError::invalid_argument(format!(
                    "Artifact path has no file name: {}",
                    file.display()
                ))
            })
    }

    /// Upload an in-memory payload as `file_name`.
    ///
    /// Fails before reaching the transport when either argument is absent. An
    /// empty name or an empty buffer is passed through unchanged.
    pub async fn upload_data(
        &self,
        data: Option<Bytes>,
        arch: Arch,
        file_name: Option<&str>,
    ) -> Result<T::Output> {
        let (Some(data), Some(file_name)) = (data, file_name) else {
            return Err(PublishError::invalid_argument("data or fileName is null"));
        };

        let data_length = data.len() as u64;
        let processor = RequestProcessor::for_data(data);
        self.transport
            .do_upload(UploadTask {
                file_name,
                arch,
                data_length,
                request_processor: &processor,
                file: None,
            })
            .await
    }
}

#[async_trait]
impl<T: Transport> Publisher for HttpPublisher<T> {
    type Output = T::Output;

    fn provider_name(&self) -> &str {
        self.transport.provider_name()
    }

    fn context(&self) -> &PublishContext {
        &self.context
    }

    async fn upload(
        &self,
        file: &Path,
        arch: Arch,
        safe_artifact_name: Option<&str>,
    ) -> Result<Self::Output> {
        let file_name = self.resolve_file_name(file, safe_artifact_name)?;
        let file_size = tokio::fs::metadata(file)
            .await
            .map_err(|source| PublishError::Stat {
                path: file.to_path_buf(),
                source,
            })?
            .len();

        let progress_bar = self.create_progress_bar(&file_name, file_size);
        let processor = RequestProcessor::for_file(
            file.to_path_buf(),
            file_size,
            progress_bar,
            self.context.cancellation_token.clone(),
        );

        self.transport
            .do_upload(UploadTask {
                file_name: &file_name,
                arch,
                data_length: file_size,
                request_processor: &processor,
                file: Some(file),
            })
            .await
    }
}

impl<T: Transport> fmt::Display for HttpPublisher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.transport, f)
    }
}
