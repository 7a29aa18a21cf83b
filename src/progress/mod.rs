//! Progress reporting for artifact uploads.
//!
//! Publishers talk to a [`ProgressContainer`] that hands out one
//! [`ProgressBar`] per logical upload. Bytes are counted by a
//! [`ProgressCallbackTransform`] sitting between the file stream and the sink.

mod terminal;
mod transform;

pub use terminal::TerminalProgress;
pub use transform::{DEFAULT_UPDATE_INTERVAL, ProgressCallbackTransform, ProgressInfo};

use std::sync::Arc;

/// Width of the bar section, in terminal columns
pub const DEFAULT_BAR_WIDTH: usize = 20;

/// Glyph drawn for the not yet transferred part of a bar
pub const DEFAULT_INCOMPLETE: char = ' ';

/// Options for a single upload bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarOptions {
    /// Total number of bytes the bar represents
    pub total: u64,
    /// Rendering width of the bar section
    pub width: usize,
    /// Glyph for the incomplete part
    pub incomplete: char,
}

impl BarOptions {
    /// Default options scoped to `total` bytes
    pub fn for_total(total: u64) -> Self {
        Self {
            total,
            width: DEFAULT_BAR_WIDTH,
            incomplete: DEFAULT_INCOMPLETE,
        }
    }
}

/// Handle to one visible progress bar
pub trait ProgressBar: Send + Sync {
    /// Advance the bar by `delta` bytes
    fn tick(&self, delta: u64);

    /// Set the bar to an absolute byte count
    fn update(&self, value: u64);
}

/// Aggregator managing the bars of concurrent uploads
pub trait ProgressContainer: Send + Sync {
    /// Register a new bar labelled `label`
    fn create_bar(&self, label: &str, options: &BarOptions) -> Arc<dyn ProgressBar>;
}
