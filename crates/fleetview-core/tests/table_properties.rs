//! Integration tests for the deployment table merge rules.
//!
//! Each property is checked over exhaustive update sequences rather than a
//! handful of hand-picked cases.
//!
//! Tests CAN use `.unwrap()` and `.expect()`.

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use fleetview_core::{
    normalize_status_message, DeploymentTable, LogRingBuffer, ResourceType, ServiceState,
    StatusUpdate, ELLIPSIS, STATUS_WIDTH,
};
use std::collections::HashSet;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

const ALL_STATES: [ServiceState; 6] = [
    ServiceState::Unknown,
    ServiceState::NotStarted,
    ServiceState::Created,
    ServiceState::Updating,
    ServiceState::Succeeded,
    ServiceState::Failed,
];

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).single().unwrap()
}

/// Every sequence of `len` states.
fn state_sequences(len: usize) -> Vec<Vec<ServiceState>> {
    (0..len).fold(vec![Vec::new()], |acc, _| {
        acc.into_iter()
            .flat_map(|prefix| {
                ALL_STATES.iter().map(move |state| {
                    let mut next = prefix.clone();
                    next.push(*state);
                    next
                })
            })
            .collect()
    })
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_names_stay_unique_across_repeated_creation() {
    let names = ["vm-a", "vm-b", "vm-c"];
    let mut table = DeploymentTable::new();

    for round in 0..5 {
        for name in names.iter().cycle().skip(round).take(names.len()) {
            table.apply_status(&StatusUpdate::vm(*name).with_location(format!("r{round}")), epoch());
        }
    }

    assert_eq!(table.len(), names.len());
    let unique: HashSet<&str> = table.iter().map(|m| m.name().as_str()).collect();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn test_only_vm_updates_create_records() {
    let types = [
        ResourceType::Vm,
        ResourceType::Nic,
        ResourceType::Nsg,
        ResourceType::Vnet,
        ResourceType::PublicIp,
        ResourceType::Disk,
    ];
    for resource in types {
        let mut table = DeploymentTable::new();
        table.apply_status(&StatusUpdate::new("vm1", resource), epoch());
        assert_eq!(table.len(), usize::from(resource == ResourceType::Vm), "{resource}");
    }
}

// ============================================================================
// Service States
// ============================================================================

#[test]
fn test_service_states_never_revert_to_unknown() {
    for sequence in state_sequences(3) {
        let mut table = DeploymentTable::new();
        let mut seen_known = false;

        for state in &sequence {
            table.apply_status(&StatusUpdate::vm("vm1").with_bacalhau(*state), epoch());
            seen_known |= state.is_known();

            let current = table.get("vm1").unwrap().bacalhau;
            if seen_known {
                assert_ne!(current, ServiceState::Unknown, "sequence {sequence:?}");
            }
        }

        // The last known state in the sequence wins
        let expected = sequence
            .iter()
            .rev()
            .find(|s| s.is_known())
            .copied()
            .unwrap_or(ServiceState::Unknown);
        assert_eq!(table.get("vm1").unwrap().bacalhau, expected, "sequence {sequence:?}");
    }
}

#[test]
fn test_derived_updates_never_override_terminal_states() {
    for sequence in state_sequences(2) {
        let mut table = DeploymentTable::new();
        table.apply_status(&StatusUpdate::vm("vm1"), epoch());

        let mut explicit_terminal = None;
        for (step, state) in sequence.iter().enumerate() {
            if step == 0 {
                table.apply_status(&StatusUpdate::vm("vm1").with_docker(*state), epoch());
                if state.is_terminal() {
                    explicit_terminal = Some(*state);
                }
            } else {
                table.apply_derived(&StatusUpdate::vm("vm1").with_docker(*state));
            }
        }

        if let Some(terminal) = explicit_terminal {
            assert_eq!(table.get("vm1").unwrap().docker, terminal, "sequence {sequence:?}");
        }
    }
}

// ============================================================================
// Elapsed Time
// ============================================================================

#[test]
fn test_elapsed_monotonic_and_frozen_when_complete() {
    let bumps = [3u64, 1, 7, 0, 7, 2, 12, 5];
    for complete_after in 0..bumps.len() {
        let mut table = DeploymentTable::new();
        table.apply_status(&StatusUpdate::vm("vm1"), epoch());
        let mut previous = Duration::ZERO;
        let mut frozen_at = None;

        for (step, secs) in bumps.iter().enumerate() {
            let mut update = StatusUpdate::vm("vm1").with_elapsed(Duration::from_secs(*secs));
            if step == complete_after {
                update = update
                    .with_ssh(ServiceState::Succeeded)
                    .with_docker(ServiceState::Succeeded)
                    .with_core_packages(ServiceState::Failed)
                    .with_bacalhau(ServiceState::Succeeded);
            }
            table.apply_status(&update, epoch());
            table.refresh_elapsed(epoch() + ChronoDuration::seconds(step as i64));

            let record = table.get("vm1").unwrap();
            let elapsed = record.elapsed();
            assert!(elapsed >= previous, "elapsed went backwards at step {step}");
            previous = elapsed;

            match frozen_at {
                Some(frozen) => assert_eq!(elapsed, frozen, "changed after completion"),
                None if record.is_complete() => frozen_at = Some(elapsed),
                None => {}
            }
        }
    }
}

// ============================================================================
// Status Message
// ============================================================================

#[test]
fn test_status_message_width_invariant() {
    for len in 0..=STATUS_WIDTH + 10 {
        let raw = format!("  {}  ", "x".repeat(len));
        let normalized = normalize_status_message(&raw);
        if len > STATUS_WIDTH - 3 {
            assert!(normalized.ends_with(ELLIPSIS), "len {len}");
            assert_eq!(normalized.matches(ELLIPSIS).count(), 1);
        } else {
            assert_eq!(normalized.chars().count(), STATUS_WIDTH, "len {len}");
        }
    }
}

// ============================================================================
// Log Ring Buffer
// ============================================================================

#[test]
fn test_ring_snapshot_after_capacity_plus_k() {
    let capacity = 10;
    for k in 0..25 {
        let mut ring = LogRingBuffer::new(capacity);
        for i in 1..=capacity + k {
            ring.push(format!("line {i}"));
        }

        let expected: Vec<String> = (k + 1..=capacity + k).map(|i| format!("line {i}")).collect();
        assert_eq!(ring.snapshot(), expected, "k = {k}");
    }
}
