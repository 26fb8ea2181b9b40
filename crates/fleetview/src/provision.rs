//! Derived docker / core-packages provisioning.
//!
//! When a machine's ssh service first reaches `Succeeded`, the dispatcher
//! spawns [`spawn_provisioning`]. The task never touches the table itself:
//! it sends each step back to the event loop as an
//! [`Event::DerivedStatus`] message, so the loop stays the only writer.

use crate::input::Event;
use fleetview_core::{MachineName, ServiceState, StatusUpdate};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The ordered provisioning steps for `name`.
///
/// Docker goes `Updating` then `Succeeded`, followed by core packages
/// doing the same.
pub fn provisioning_steps(name: &MachineName) -> [StatusUpdate; 4] {
    [
        StatusUpdate::vm(name.clone()).with_docker(ServiceState::Updating),
        StatusUpdate::vm(name.clone()).with_docker(ServiceState::Succeeded),
        StatusUpdate::vm(name.clone()).with_core_packages(ServiceState::Updating),
        StatusUpdate::vm(name.clone()).with_core_packages(ServiceState::Succeeded),
    ]
}

/// Spawns the provisioning task for one machine.
///
/// Steps are separated by `step_delay`. The task stops early when
/// `cancel` fires or the inbox has been closed.
pub fn spawn_provisioning(
    name: MachineName,
    event_tx: mpsc::UnboundedSender<Event>,
    step_delay: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for step in provisioning_steps(&name) {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(machine = %name, "provisioning cancelled");
                    return;
                }
                _ = tokio::time::sleep(step_delay) => {}
            }

            if event_tx.send(Event::DerivedStatus(step)).is_err() {
                debug!(machine = %name, "inbox closed, provisioning abandoned");
                return;
            }
        }
        debug!(machine = %name, "provisioning finished");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(event: Event) -> StatusUpdate {
        match event {
            Event::DerivedStatus(update) => update,
            other => panic!("expected derived status, got {other:?}"),
        }
    }

    #[test]
    fn test_steps_update_before_success() {
        let steps = provisioning_steps(&MachineName::new("vm1"));
        assert_eq!(steps[0].docker, ServiceState::Updating);
        assert_eq!(steps[1].docker, ServiceState::Succeeded);
        assert_eq!(steps[2].core_packages, ServiceState::Updating);
        assert_eq!(steps[3].core_packages, ServiceState::Succeeded);
        assert!(steps.iter().all(|s| s.name.as_str() == "vm1"));
        assert!(steps.iter().all(|s| s.ssh == ServiceState::Unknown));
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_sends_all_steps_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_provisioning(
            MachineName::new("vm1"),
            tx,
            Duration::from_millis(150),
            CancellationToken::new(),
        );
        handle.await.unwrap();

        let received: Vec<StatusUpdate> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(derived)
            .collect();
        assert_eq!(received, provisioning_steps(&MachineName::new("vm1")).to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let handle = spawn_provisioning(
            MachineName::new("vm1"),
            tx,
            Duration::from_millis(150),
            cancel,
        );
        handle.await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_inbox_stops_task() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = spawn_provisioning(
            MachineName::new("vm1"),
            tx,
            Duration::from_millis(10),
            CancellationToken::new(),
        );
        // Finishes instead of hanging
        handle.await.unwrap();
    }
}
