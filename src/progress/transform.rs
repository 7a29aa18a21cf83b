//! Byte counting stream adapter.

use crate::error::UploadCancelled;
use bytes::Bytes;
use futures_lite::Stream;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Minimum delay between two progress callbacks while data flows
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Snapshot handed to the progress callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressInfo {
    /// Expected number of bytes
    pub total: u64,
    /// Bytes observed since the previous callback
    pub delta: u64,
    /// Bytes observed so far
    pub transferred: u64,
    /// Completion in percent
    pub percent: f64,
    /// Average throughput since the stream started
    pub bytes_per_second: u64,
}

type ProgressCallback = Box<dyn Fn(&ProgressInfo) + Send + Sync>;

/// Stream adapter that reports the bytes it forwards and stops on cancellation.
///
/// Deltas are batched and reported at most once per interval. When the source
/// ends, the remaining delta is reported with `percent == 100.0`, so the deltas
/// of one transform always add up to the bytes it forwarded.
///
/// Once the token is cancelled the next poll yields a single error item
/// wrapping [`UploadCancelled`] and the stream ends.
pub struct ProgressCallbackTransform<S> {
    inner: S,
    total: u64,
    cancellation: CancellationToken,
    on_progress: ProgressCallback,
    interval: Duration,
    start: Instant,
    next_update: Instant,
    transferred: u64,
    delta: u64,
    done: bool,
}

impl<S> ProgressCallbackTransform<S> {
    /// Wrap `inner`, expecting `total` bytes
    pub fn new<F>(inner: S, total: u64, cancellation: CancellationToken, on_progress: F) -> Self
    where
        F: Fn(&ProgressInfo) + Send + Sync + 'static,
    {
        let start = Instant::now();
        Self {
            inner,
            total,
            cancellation,
            on_progress: Box::new(on_progress),
            interval: DEFAULT_UPDATE_INTERVAL,
            start,
            next_update: start + DEFAULT_UPDATE_INTERVAL,
            transferred: 0,
            delta: 0,
            done: false,
        }
    }

    /// Override the delay between progress callbacks
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self.next_update = self.start + interval;
        self
    }

    /// Bytes forwarded so far
    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    fn emit(&mut self, percent: f64) {
        let elapsed = self.start.elapsed().as_secs_f64();
        let bytes_per_second = if elapsed > 0.0 {
            (self.transferred as f64 / elapsed).round() as u64
        } else {
            0
        };

        (self.on_progress)(&ProgressInfo {
            total: self.total,
            delta: self.delta,
            transferred: self.transferred,
            percent,
            bytes_per_second,
        });
        self.delta = 0;
    }

    fn cancelled(&mut self) -> Poll<Option<io::Result<Bytes>>> {
        self.done = true;
        Poll::Ready(Some(Err(UploadCancelled.into_io_error())))
    }
}

impl<S> Stream for ProgressCallbackTransform<S>
where
    S: Stream<Item = io::Result<Bytes>> + Unpin,
{
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        if this.cancellation.is_cancelled() {
            return this.cancelled();
        }

        match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
            Some(Ok(chunk)) => {
                let len = chunk.len() as u64;
                this.transferred += len;
                this.delta += len;

                let now = Instant::now();
                if now >= this.next_update && this.transferred != this.total {
                    this.next_update = now + this.interval;
                    let percent = if this.total == 0 {
                        100.0
                    } else {
                        this.transferred as f64 * 100.0 / this.total as f64
                    };
                    this.emit(percent);
                }
                Poll::Ready(Some(Ok(chunk)))
            }
            Some(Err(e)) => {
                this.done = true;
                Poll::Ready(Some(Err(e)))
            }
            None => {
                if this.cancellation.is_cancelled() {
                    return this.cancelled();
                }
                this.done = true;
                this.emit(100.0);
                Poll::Ready(None)
            }
        }
    }
}
