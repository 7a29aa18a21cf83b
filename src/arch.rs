//! Target architectures of published artifacts.

use crate::error::PublishError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CPU architecture an artifact was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 32-bit x86
    Ia32,
    /// 64-bit x86
    X64,
    /// 32-bit ARM (hard float)
    Armv7l,
    /// 64-bit ARM
    Arm64,
    /// macOS universal binary (x64 + arm64)
    Universal,
}

impl Arch {
    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Ia32 => "ia32",
            Arch::X64 => "x64",
            Arch::Armv7l => "armv7l",
            Arch::Arm64 => "arm64",
            Arch::Universal => "universal",
        }
    }

    /// Architecture of the running host, when it is one we publish for
    pub fn current() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86" => Some(Arch::Ia32),
            "x86_64" => Some(Arch::X64),
            "arm" => Some(Arch::Armv7l),
            "aarch64" => Some(Arch::Arm64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ia32" => Ok(Arch::Ia32),
            "x64" => Ok(Arch::X64),
            "armv7l" => Ok(Arch::Armv7l),
            "arm64" => Ok(Arch::Arm64),
            "universal" => Ok(Arch::Universal),
            other => Err(PublishError::invalid_argument(format!(
                "Unknown architecture '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for arch in [Arch::Ia32, Arch::X64, Arch::Armv7l, Arch::Arm64, Arch::Universal] {
            assert_eq!(arch.as_str().parse::<Arch>().ok(), Some(arch));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            "sparc".parse::<Arch>(),
            Err(PublishError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Arch::Armv7l).expect("serialize");
        assert_eq!(json, "\"armv7l\"");
    }
}
