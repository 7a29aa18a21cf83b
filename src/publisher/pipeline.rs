//! Progress aware read pipelines: file stream → progress transform → sink.

use crate::context::PublishContext;
use crate::error::{PublishError, Result};
use crate::progress::{BarOptions, ProgressBar, ProgressCallbackTransform, ProgressInfo};
use bytes::Bytes;
use futures_lite::{Stream, StreamExt};
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

/// Boxed stream of artifact bytes for one attempt
pub type ByteStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>;

/// Create the bar of one logical upload.
///
/// Without a progress container a single `Uploading <file> to <provider>` line
/// is logged instead and `None` is returned.
pub fn create_progress_bar(
    context: &PublishContext,
    provider_name: &str,
    file_name: &str,
    file_size: u64,
) -> Option<Arc<dyn ProgressBar>> {
    match &context.progress {
        None => {
            log::info!("Uploading {} to {}", file_name, provider_name);
            None
        }
        Some(progress) => {
            let label = format!("{} to {}", console::style(file_name).green(), provider_name);
            Some(progress.create_bar(&label, &BarOptions::for_total(file_size)))
        }
    }
}

/// Open `file` as a byte stream, counted into `progress_bar` when one is given.
///
/// A fresh transform is built on every call so attempts never share counters.
pub async fn open_read_stream(
    file: &Path,
    file_size: u64,
    progress_bar: Option<Arc<dyn ProgressBar>>,
    cancellation_token: &CancellationToken,
) -> Result<ByteStream> {
    let input = tokio::fs::File::open(file).await?;
    let stream = ReaderStream::new(input);

    match progress_bar {
        None => Ok(Box::pin(stream)),
        Some(bar) => Ok(Box::pin(ProgressCallbackTransform::new(
            stream,
            file_size,
            cancellation_token.clone(),
            move |info: &ProgressInfo| bar.tick(info.delta),
        ))),
    }
}

/// Copy every chunk of `stream` into `sink`, then shut the sink down.
///
/// Stream errors, including cancellation, abort the copy and are returned.
pub async fn pipe_to_sink<W>(mut stream: ByteStream, sink: &mut W) -> Result<u64>
where
    W: AsyncWrite + Unpin + Send + ?Sized,
{
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(PublishError::from_stream_error)?;
        sink.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    sink.shutdown().await?;
    Ok(written)
}
