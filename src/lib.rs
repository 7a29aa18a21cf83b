//! # Artifact Publish
//!
//! Streaming artifact uploads for release publishing.
//!
//! A release tool hands each built artifact to a [`Publisher`]. The publisher
//! stats the file, shows one progress bar per artifact and lets the provider
//! [`Transport`] stream it as many times as its retry policy needs. The bar is
//! reset before every attempt and a shared cancellation token stops all
//! uploads of a run.
//!
//! ## Features
//!
//! - **Provider agnostic**: [`HttpPublisher`] wraps any [`Transport`]
//! - **Progress**: byte counting [`progress::ProgressCallbackTransform`] and
//!   indicatif backed [`TerminalProgress`]
//! - **Cancellation**: cooperative, observed at chunk granularity
//! - **CI tags**: [`ci_tag`] detects the release tag of common CI providers
//!
//! ## Usage
//!
//! ```no_run
//! use artifact_publish::{
//!     Arch, HttpPublisher, PublishContext, Publisher, Result, Transport, UploadTask,
//! };
//! use async_trait::async_trait;
//! use std::fmt;
//!
//! struct Discard;
//!
//! impl fmt::Display for Discard {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("Discard")
//!     }
//! }
//!
//! #[async_trait]
//! impl Transport for Discard {
//!     type Output = u64;
//!
//!     fn provider_name(&self) -> &str {
//!         "discard"
//!     }
//!
//!     async fn do_upload(&self, task: UploadTask<'_>) -> Result<u64> {
//!         task.request_processor.process(&mut tokio::io::sink()).await
//!     }
//! }
//!
//! # async fn run() -> Result<()> {
//! let publisher = HttpPublisher::new(PublishContext::default(), Discard);
//! publisher.upload("dist/app.zip".as_ref(), Arch::X64, None).await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod arch;
pub mod ci;
pub mod context;
pub mod env;
pub mod error;
pub mod options;
pub mod progress;
pub mod publisher;

// Re-export main types for public API
pub use arch::Arch;
pub use ci::ci_tag;
pub use context::PublishContext;
pub use env::EnvConfig;
pub use error::{PublishError, Result, UploadCancelled};
pub use options::{PublishOptions, PublishPolicy};
pub use progress::{BarOptions, ProgressBar, ProgressContainer, TerminalProgress};
pub use publisher::{HttpPublisher, Publisher, RequestProcessor, Transport, UploadTask};
