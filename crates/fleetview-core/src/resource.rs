//! Cloud resource kinds reported by status events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource a status event refers to.
///
/// Only [`ResourceType::Vm`] events may create a new machine row; events
/// for the other kinds only update machines that already exist.
///
/// Defaults to `Vm`: a decoded [`StatusUpdate`](crate::StatusUpdate) that
/// omits `resource_type` is treated as a VM event and may create a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Virtual machine
    #[default]
    Vm,

    /// Network interface card
    Nic,

    /// Network security group
    Nsg,

    /// Virtual network
    Vnet,

    /// Public IP address
    PublicIp,

    /// Managed disk
    Disk,
}

impl ResourceType {
    /// Returns the short code shown in the "Type" column.
    #[must_use]
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::Vm => "VM",
            Self::Nic => "NIC",
            Self::Nsg => "NSG",
            Self::Vnet => "VNET",
            Self::PublicIp => "IP",
            Self::Disk => "DISK",
        }
    }

    /// Returns a descriptive label for the resource kind.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vm => "Virtual Machine",
            Self::Nic => "Network Interface",
            Self::Nsg => "Network Security Group",
            Self::Vnet => "Virtual Network",
            Self::PublicIp => "Public IP Address",
            Self::Disk => "Disk",
        }
    }

    /// Whether an event of this kind may create a new machine record.
    #[must_use]
    pub fn creates_machine(&self) -> bool {
        matches!(self, Self::Vm)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
