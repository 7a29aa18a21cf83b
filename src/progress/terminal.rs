//! Terminal progress bars backed by indicatif.

use super::{BarOptions, ProgressBar, ProgressContainer};
use indicatif::{MultiProgress, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;

/// Multi-bar terminal display, one line per upload
#[derive(Debug, Clone, Default)]
pub struct TerminalProgress {
    multi: MultiProgress,
}

impl TerminalProgress {
    /// Draw bars to stderr
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep bar state without drawing anything
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    fn new_bar(&self, label: &str, options: &BarOptions) -> indicatif::ProgressBar {
        let bar = self.multi.add(indicatif::ProgressBar::new(options.total));
        if let Some(style) = bar_style(options) {
            bar.set_style(style);
        }
        bar.set_message(label.to_string());
        bar
    }
}

/// Style for an upload bar, `None` when the template cannot be parsed
fn bar_style(options: &BarOptions) -> Option<ProgressStyle> {
    let template = format!("[{{bar:{}}}] {{percent}}% {{eta}} | {{msg}}", options.width);
    match ProgressStyle::with_template(&template) {
        Ok(style) => Some(style.progress_chars(&format!("=>{}", options.incomplete))),
        Err(e) => {
            log::debug!("Invalid progress template {}: {}", template, e);
            None
        }
    }
}

impl ProgressContainer for TerminalProgress {
    fn create_bar(&self, label: &str, options: &BarOptions) -> Arc<dyn ProgressBar> {
        Arc::new(self.new_bar(label, options))
    }
}

impl ProgressBar for indicatif::ProgressBar {
    fn tick(&self, delta: u64) {
        self.inc(delta);
    }

    fn update(&self, value: u64) {
        self.set_position(value);
    }
}
