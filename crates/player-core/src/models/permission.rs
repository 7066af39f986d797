use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Read-access state of a local file handle.
///
/// `Unknown` is the state of a video whose permission has never been synced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
    #[default]
    Unknown,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

impl Display for PermissionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PermissionState::Granted => write!(f, "granted"),
            PermissionState::Denied => write!(f, "denied"),
            PermissionState::Prompt => write!(f, "prompt"),
            PermissionState::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for PermissionState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "granted" => Ok(PermissionState::Granted),
            "denied" => Ok(PermissionState::Denied),
            "prompt" => Ok(PermissionState::Prompt),
            "unknown" | "" => Ok(PermissionState::Unknown),
            _ => Err(anyhow::anyhow!("Invalid permission state: {}", s)),
        }
    }
}
