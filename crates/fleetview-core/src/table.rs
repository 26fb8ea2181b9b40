//! The ordered machine table (entity store).

use crate::{MachineRecord, StatusUpdate};
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

/// Result of applying a status update to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The update was dropped (empty name, or unknown non-VM machine).
    Ignored,

    /// A new record was created and the update merged into it.
    Created {
        /// `ssh` transitioned to `Succeeded`.
        ssh_succeeded: bool,
    },

    /// An existing record was updated in place.
    Updated {
        /// `ssh` transitioned to `Succeeded`.
        ssh_succeeded: bool,
    },
}

impl ApplyOutcome {
    /// Whether the derived docker/core-packages provisioning should start.
    #[must_use]
    pub fn ssh_succeeded(&self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Created { ssh_succeeded } | Self::Updated { ssh_succeeded } => *ssh_succeeded,
        }
    }
}

/// Machine records in insertion order, keyed by name.
///
/// Insertion order is render order. Records are never removed or
/// reordered for the life of the table.
#[derive(Debug, Clone, Default)]
pub struct DeploymentTable {
    machines: Vec<MachineRecord>,
}

impl DeploymentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an explicit status update.
    ///
    /// Known names are merged in place. Unknown names create a new record
    /// started at `now` only when the update comes from a VM; anything
    /// else is dropped silently.
    pub fn apply_status(&mut self, update: &StatusUpdate, now: DateTime<Utc>) -> ApplyOutcome {
        if update.name.is_empty() {
            trace!("dropping status update with empty name");
            return ApplyOutcome::Ignored;
        }

        if let Some(record) = self.get_mut(update.name.as_str()) {
            let ssh_succeeded = record.apply(update);
            return ApplyOutcome::Updated { ssh_succeeded };
        }

        if !update.resource_type.creates_machine() {
            trace!(
                machine = %update.name,
                resource = update.resource_type.short_code(),
                "dropping update for unknown machine"
            );
            return ApplyOutcome::Ignored;
        }

        debug!(machine = %update.name, "creating machine record");
        let mut record = MachineRecord::new(update.name.clone(), update.resource_type, now);
        let ssh_succeeded = record.apply(update);
        self.machines.push(record);
        ApplyOutcome::Created { ssh_succeeded }
    }

    /// Applies a derived update to an existing record.
    ///
    /// Derived updates never create records and never overwrite a service
    /// that already reached a terminal state. Returns true if anything
    /// changed.
    pub fn apply_derived(&mut self, update: &StatusUpdate) -> bool {
        match self.get_mut(update.name.as_str()) {
            Some(record) => record.apply_derived(update),
            None => false,
        }
    }

    /// Advances the elapsed time of every incomplete record to `now`.
    pub fn refresh_elapsed(&mut self, now: DateTime<Utc>) {
        for record in &mut self.machines {
            record.refresh_elapsed(now);
        }
    }

    /// Looks up a record by name.
    pub fn get(&self, name: &str) -> Option<&MachineRecord> {
        self.machines.iter().find(|m| m.name().as_str() == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut MachineRecord> {
        self.machines.iter_mut().find(|m| m.name().as_str() == name)
    }

    /// Iterates records in insertion (render) order.
    pub fn iter(&self) -> impl Iterator<Item = &MachineRecord> {
        self.machines.iter()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Number of records whose services have all finished.
    pub fn complete_count(&self) -> usize {
        self.machines.iter().filter(|m| m.is_complete()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResourceType, ServiceState};

    #[test]
    fn test_empty_name_ignored() {
        let mut table = DeploymentTable::new();
        let outcome = table.apply_status(&StatusUpdate::vm(""), Utc::now());
        assert_eq!(outcome, ApplyOutcome::Ignored);
        assert!(table.is_empty());
    }

    #[test]
    fn test_vm_update_creates_record() {
        let mut table = DeploymentTable::new();
        let update = StatusUpdate::vm("vm1").with_location("us-west-2");
        let outcome = table.apply_status(&update, Utc::now());

        assert_eq!(outcome, ApplyOutcome::Created { ssh_succeeded: false });
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("vm1").map(|m| m.location.as_str()), Some("us-west-2"));
    }

    #[test]
    fn test_non_vm_update_for_unknown_machine_dropped() {
        let mut table = DeploymentTable::new();
        let update = StatusUpdate::new("vm1", ResourceType::Nic).with_location("us-west-2");
        assert_eq!(table.apply_status(&update, Utc::now()), ApplyOutcome::Ignored);
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_vm_update_for_known_machine_applies() {
        let mut table = DeploymentTable::new();
        table.apply_status(&StatusUpdate::vm("vm1"), Utc::now());

        let update = StatusUpdate::new("vm1", ResourceType::PublicIp).with_public_ip("20.1.2.3");
        let outcome = table.apply_status(&update, Utc::now());

        assert_eq!(outcome, ApplyOutcome::Updated { ssh_succeeded: false });
        assert_eq!(table.get("vm1").map(|m| m.public_ip.as_str()), Some("20.1.2.3"));
        // The row keeps the resource type it was created with
        assert_eq!(table.get("vm1").map(|m| m.resource_type), Some(ResourceType::Vm));
    }

    #[test]
    fn test_repeated_creation_updates_in_place() {
        let mut table = DeploymentTable::new();
        table.apply_status(&StatusUpdate::vm("vm1").with_location("a"), Utc::now());
        table.apply_status(&StatusUpdate::vm("vm2"), Utc::now());
        table.apply_status(&StatusUpdate::vm("vm1").with_location("b"), Utc::now());

        assert_eq!(table.len(), 2);
        let names: Vec<&str> = table.iter().map(|m| m.name().as_str()).collect();
        assert_eq!(names, vec!["vm1", "vm2"]);
        assert_eq!(table.get("vm1").map(|m| m.location.as_str()), Some("b"));
    }

    #[test]
    fn test_ssh_success_reported_on_creation() {
        let mut table = DeploymentTable::new();
        let update = StatusUpdate::vm("vm1").with_ssh(ServiceState::Succeeded);
        let outcome = table.apply_status(&update, Utc::now());
        assert!(outcome.ssh_succeeded());
        assert!(matches!(outcome, ApplyOutcome::Created { .. }));
    }

    #[test]
    fn test_apply_derived_never_creates() {
        let mut table = DeploymentTable::new();
        let derived = StatusUpdate::vm("ghost").with_docker(ServiceState::Updating);
        assert!(!table.apply_derived(&derived));
        assert!(table.is_empty());
    }

    #[test]
    fn test_complete_count() {
        let mut table = DeploymentTable::new();
        table.apply_status(
            &StatusUpdate::vm("done")
                .with_ssh(ServiceState::Succeeded)
                .with_docker(ServiceState::Succeeded)
                .with_core_packages(ServiceState::Succeeded)
                .with_bacalhau(ServiceState::Failed),
            Utc::now(),
        );
        table.apply_status(&StatusUpdate::vm("pending"), Utc::now());
        assert_eq!(table.complete_count(), 1);
    }

    #[test]
    fn test_decoded_update_without_type_creates_record() {
        let mut table = DeploymentTable::new();
        let untyped: StatusUpdate = serde_json::from_str(r#"{"name":"vm1"}"#).unwrap();
        assert_eq!(untyped.resource_type, ResourceType::Vm);
        assert!(matches!(
            table.apply_status(&untyped, Utc::now()),
            ApplyOutcome::Created { .. }
        ));

        let nic: StatusUpdate =
            serde_json::from_str(r#"{"name":"vm2","resource_type":"nic"}"#).unwrap();
        assert_eq!(table.apply_status(&nic, Utc::now()), ApplyOutcome::Ignored);
        assert_eq!(table.len(), 1);
    }
}
