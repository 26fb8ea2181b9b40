//! Status update deltas produced by event sources.

use crate::{MachineName, ResourceType, ServiceState};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A partial update for one machine row.
///
/// Optional fields are `None` when the producer has nothing to report.
/// Service fields use [`ServiceState::Unknown`] for the same purpose.
/// Absent values never overwrite what the table already holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusUpdate {
    /// Machine this update targets. Empty names are ignored.
    pub name: MachineName,

    /// Kind of resource the event originated from.
    pub resource_type: ResourceType,

    pub location: Option<String>,
    pub status_message: Option<String>,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,

    /// Elapsed provisioning time reported by the producer.
    pub elapsed: Option<Duration>,

    /// Whether the machine acts as the cluster orchestrator.
    pub orchestrator: Option<bool>,

    pub ssh: ServiceState,
    pub docker: ServiceState,
    pub core_packages: ServiceState,
    pub bacalhau: ServiceState,
}

impl StatusUpdate {
    /// Creates an empty update for `name` originating from `resource_type`.
    pub fn new(name: impl Into<MachineName>, resource_type: ResourceType) -> Self {
        Self {
            name: name.into(),
            resource_type,
            ..Self::default()
        }
    }

    /// Creates an empty update for a virtual machine.
    pub fn vm(name: impl Into<MachineName>) -> Self {
        Self::new(name, ResourceType::Vm)
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_public_ip(mut self, ip: impl Into<String>) -> Self {
        self.public_ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn with_private_ip(mut self, ip: impl Into<String>) -> Self {
        self.private_ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    #[must_use]
    pub fn with_orchestrator(mut self, orchestrator: bool) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }

    #[must_use]
    pub fn with_ssh(mut self, state: ServiceState) -> Self {
        self.ssh = state;
        self
    }

    #[must_use]
    pub fn with_docker(mut self, state: ServiceState) -> Self {
        self.docker = state;
        self
    }

    #[must_use]
    pub fn with_core_packages(mut self, state: ServiceState) -> Self {
        self.core_packages = state;
        self
    }

    #[must_use]
    pub fn with_bacalhau(mut self, state: ServiceState) -> Self {
        self.bacalhau = state;
        self
    }
}
