//! Lifecycle state of the services provisioned on a machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of one service (SSH, Docker, core packages, Bacalhau).
///
/// `Unknown` is the "no update received yet" sentinel. It is never written
/// over a state that has already been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    /// No update received yet.
    #[default]
    Unknown,

    /// Reported, but provisioning has not begun.
    NotStarted,

    /// The service resource exists but is not configured yet.
    Created,

    /// Provisioning or configuration is in progress.
    Updating,

    /// Provisioning finished successfully.
    Succeeded,

    /// Provisioning finished with an error.
    Failed,
}

impl ServiceState {
    /// Returns the lowercase label for this state.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::NotStarted => "not started",
            Self::Created => "created",
            Self::Updating => "updating",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// True for every state except the `Unknown` sentinel.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// True once the service has finished, successfully or not.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Merges an incoming state into this one.
    ///
    /// `Unknown` never overwrites. Returns true if the stored value changed.
    pub fn merge(&mut self, incoming: ServiceState) -> bool {
        if !incoming.is_known() || *self == incoming {
            return false;
        }
        *self = incoming;
        true
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
