//! Machine records and their field-level merge rules.

use crate::{ResourceType, ServiceState, StatusUpdate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::trace;

/// Fixed display width of the status message column.
pub const STATUS_WIDTH: usize = 30;

/// Marker appended to status messages that had to be truncated.
pub const ELLIPSIS: &str = "…";

/// Number of lifecycle steps tracked by the progress bar.
pub const TOTAL_STEPS: usize = 7;

// ============================================================================
// Machine Name
// ============================================================================

/// Unique, immutable key of a machine row (e.g. "i-042917").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineName(String);

impl MachineName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MachineName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MachineName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for MachineName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Status Message Normalization
// ============================================================================

/// Normalizes a status message to the status column width.
///
/// The message is trimmed. If it is longer than `STATUS_WIDTH - 3`
/// characters it is cut to that length and [`ELLIPSIS`] is appended,
/// otherwise it is right-padded with spaces to exactly `STATUS_WIDTH`.
#[must_use]
pub fn normalize_status_message(raw: &str) -> String {
    normalize_to_width(raw, STATUS_WIDTH)
}

fn normalize_to_width(raw: &str, width: usize) -> String {
    let trimmed = raw.trim();
    let keep = width.saturating_sub(3);
    if trimmed.chars().count() > keep {
        let mut truncated: String = trimmed.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        format!("{trimmed:<width$}")
    }
}

// ============================================================================
// Machine Record
// ============================================================================

/// One row of the deployment table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineRecord {
    name: MachineName,
    pub resource_type: ResourceType,
    pub location: String,
    /// Always stored width-normalized, see [`normalize_status_message`].
    pub status_message: String,
    pub start_time: DateTime<Utc>,
    elapsed: Duration,
    pub public_ip: String,
    pub private_ip: String,
    pub orchestrator: bool,
    pub ssh: ServiceState,
    pub docker: ServiceState,
    pub core_packages: ServiceState,
    pub bacalhau: ServiceState,
}

impl MachineRecord {
    /// Creates an empty record started at `now` with every service `Unknown`.
    pub fn new(name: MachineName, resource_type: ResourceType, now: DateTime<Utc>) -> Self {
        Self {
            name,
            resource_type,
            location: String::new(),
            status_message: normalize_status_message(""),
            start_time: now,
            elapsed: Duration::ZERO,
            public_ip: String::new(),
            private_ip: String::new(),
            orchestrator: false,
            ssh: ServiceState::Unknown,
            docker: ServiceState::Unknown,
            core_packages: ServiceState::Unknown,
            bacalhau: ServiceState::Unknown,
        }
    }

    pub fn name(&self) -> &MachineName {
        &self.name
    }

    /// Elapsed provisioning time. Never decreases.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The four tracked services in display order.
    pub fn services(&self) -> [ServiceState; 4] {
        [self.ssh, self.docker, self.core_packages, self.bacalhau]
    }

    /// True once every tracked service has reached a terminal state.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.services().iter().all(ServiceState::is_terminal)
    }

    /// Returns `(completed, TOTAL_STEPS)` for the progress bar.
    ///
    /// Steps: location known, public IP, private IP, and each of the
    /// four services having succeeded.
    pub fn progress(&self) -> (usize, usize) {
        let assigned = [&self.location, &self.public_ip, &self.private_ip]
            .iter()
            .filter(|field| !field.is_empty())
            .count();
        let succeeded = self
            .services()
            .iter()
            .filter(|state| **state == ServiceState::Succeeded)
            .count();
        (assigned + succeeded, TOTAL_STEPS)
    }

    /// Moves the elapsed time forward to `candidate`.
    ///
    /// Ignored once the record is complete or when `candidate` would not
    /// increase the stored value. Returns true if the value changed.
    pub fn advance_elapsed(&mut self, candidate: Duration) -> bool {
        if self.is_complete() || candidate <= self.elapsed {
            return false;
        }
        self.elapsed = candidate;
        true
    }

    /// Advances elapsed time to the wall-clock time since `start_time`.
    pub fn refresh_elapsed(&mut self, now: DateTime<Utc>) -> bool {
        let since_start = (now - self.start_time).to_std().unwrap_or_default();
        self.advance_elapsed(since_start)
    }

    /// Applies an explicit status update.
    ///
    /// Each field is overwritten only by a present, non-empty, non-`Unknown`
    /// value. Returns true if `ssh` transitioned to `Succeeded`.
    pub fn apply(&mut self, update: &StatusUpdate) -> bool {
        if let Some(message) = non_blank(&update.status_message) {
            self.status_message = normalize_status_message(message);
        }
        if let Some(location) = non_blank(&update.location) {
            self.location = location.to_string();
        }
        if let Some(ip) = non_blank(&update.public_ip) {
            self.public_ip = ip.to_string();
        }
        if let Some(ip) = non_blank(&update.private_ip) {
            self.private_ip = ip.to_string();
        }
        // Completeness is judged before this update's service states land
        if let Some(elapsed) = update.elapsed.filter(|e| !e.is_zero()) {
            self.advance_elapsed(elapsed);
        }
        if let Some(orchestrator) = update.orchestrator {
            self.orchestrator = orchestrator;
        }

        let ssh_changed = self.ssh.merge(update.ssh);
        self.docker.merge(update.docker);
        self.core_packages.merge(update.core_packages);
        self.bacalhau.merge(update.bacalhau);

        let ssh_succeeded = ssh_changed && self.ssh == ServiceState::Succeeded;
        if ssh_succeeded {
            trace!(machine = %self.name, "ssh reached succeeded");
        }
        ssh_succeeded
    }

    /// Applies an update derived from another state transition.
    ///
    /// Only service fields are considered, and a service already in a
    /// terminal state is left untouched. Returns true if anything changed.
    pub fn apply_derived(&mut self, update: &StatusUpdate) -> bool {
        let mut changed = false;
        for (current, incoming) in [
            (&mut self.ssh, update.ssh),
            (&mut self.docker, update.docker),
            (&mut self.core_packages, update.core_packages),
            (&mut self.bacalhau, update.bacalhau),
        ] {
            if !current.is_terminal() {
                changed |= current.merge(incoming);
            }
        }
        changed
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
