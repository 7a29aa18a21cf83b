//! Release tag detection for CI builds.

use crate::env::EnvConfig;

/// Tag variables exported by supported CI providers, highest priority first
pub const CI_TAG_VARIABLES: [&str; 5] = [
    "TRAVIS_TAG",
    "APPVEYOR_REPO_TAG_NAME",
    "CIRCLE_TAG",
    "BITRISE_GIT_TAG",
    "CI_BUILD_TAG",
];

/// Return the release tag the CI build was triggered for, if any.
///
/// The first variable of [`CI_TAG_VARIABLES`] holding a non-empty value wins.
pub fn ci_tag(env: &EnvConfig) -> Option<String> {
    CI_TAG_VARIABLES
        .iter()
        .find_map(|key| env.get_non_empty(key))
        .map(str::to_string)
}
