//! Publish options shared by every provider configuration.

use crate::error::PublishError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When artifacts should be published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublishPolicy {
    /// Publish only when the build runs for a tag
    OnTag,
    /// Publish for tags or when a draft release exists
    OnTagOrDraft,
    /// Always publish
    Always,
    /// Never publish
    Never,
}

impl PublishPolicy {
    /// Canonical camelCase spelling
    pub fn as_str(self) -> &'static str {
        match self {
            PublishPolicy::OnTag => "onTag",
            PublishPolicy::OnTagOrDraft => "onTagOrDraft",
            PublishPolicy::Always => "always",
            PublishPolicy::Never => "never",
        }
    }
}

impl fmt::Display for PublishPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishPolicy {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onTag" => Ok(PublishPolicy::OnTag),
            "onTagOrDraft" => Ok(PublishPolicy::OnTagOrDraft),
            "always" => Ok(PublishPolicy::Always),
            "never" => Ok(PublishPolicy::Never),
            other => Err(PublishError::invalid_argument(format!(
                "Unknown publish policy '{}' (expected onTag, onTagOrDraft, always or never)",
                other
            ))),
        }
    }
}

/// Options recognised by every publisher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOptions {
    /// Publish policy, `None` leaves the decision to the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishPolicy>,
    /// Create the release as a draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Mark the release as a prerelease
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}
