//! Synthetic event sources.
//!
//! Nothing here talks to real infrastructure. The machine generator
//! invents VMs and walks their services through a plausible lifecycle,
//! and the log generator fills a [`SharedLogRing`] with random entries.
//! Both run as independent tasks and stop cooperatively on cancellation.

use crate::input::Event;
use fleetview_core::{MachineName, ServiceState, SharedLogRing, StatusUpdate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Target under which every generated log entry is sampled to the log file.
pub const GENERATED_LOG_TARGET: &str = "fleetview::generated";

const REGIONS: &[&str] = &[
    "us-west-1",
    "us-west-2",
    "us-east-1",
    "us-east-2",
    "eu-west-1",
    "eu-central-1",
    "ap-southeast-1",
    "ap-northeast-1",
];

const STATUS_MESSAGES: &[&str] = &[
    "Pending",
    "Launching",
    "Running",
    "Healthy",
    "Configuring network interfaces",
    "Waiting for cloud-init to finish on first boot",
    "Stopping",
    "Powered off",
];

#[rustfmt::skip]
const WORDS: &[&str] = &[
    "Deploying", "Configuring", "Initializing", "Updating", "Processing",
    "Resource", "Network", "Storage", "Compute", "Database",
    "Server", "Cloud", "Virtual", "Container", "Cluster",
    "Scaling", "Balancing", "Routing", "Firewall", "Gateway",
    "Backup", "Recovery", "Monitoring", "Logging", "Analytics",
    "API", "Microservice", "Function", "Queue", "Cache",
    "Encryption", "Authentication", "Authorization", "Endpoint", "Protocol",
    "Bandwidth", "Latency", "Throughput", "Packet", "Payload",
    "Instance", "Volume", "Snapshot", "Image", "Template",
    "Orchestration", "Provisioning", "Allocation", "Replication", "Failover",
    "Namespace", "Repository", "Registry", "Artifact", "Pipeline",
    "Webhook", "Trigger", "Event", "Stream", "Batch",
    "Scheduler", "Task", "Job", "Workflow", "Daemon",
    "Socket", "Port", "Bridge", "Tunnel", "Proxy",
    "Certificate", "Token", "Session", "Thread", "Middleware",
];

// ============================================================================
// Random Helpers
// ============================================================================

/// A random dotted-quad IPv4 address.
pub fn random_ip<R: Rng + ?Sized>(rng: &mut R) -> String {
    let [a, b, c, d]: [u8; 4] = rng.gen();
    format!("{a}.{b}.{c}.{d}")
}

pub fn random_region<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    REGIONS.choose(rng).copied().unwrap_or("us-east-1")
}

/// A log entry of three to seven random words.
pub fn random_log_entry<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(3..=7);
    (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Moves a simulated service one step along its lifecycle.
///
/// Services go `NotStarted` → `Updating` → `Succeeded`, with a small
/// chance of `Failed` instead. Terminal states stay put.
fn next_service_state<R: Rng + ?Sized>(current: ServiceState, rng: &mut R) -> ServiceState {
    match current {
        ServiceState::Unknown | ServiceState::NotStarted | ServiceState::Created => {
            ServiceState::Updating
        }
        ServiceState::Updating if rng.gen_bool(0.9) => ServiceState::Succeeded,
        ServiceState::Updating => ServiceState::Failed,
        terminal => terminal,
    }
}

// ============================================================================
// Machine Event Generator
// ============================================================================

#[derive(Debug, Clone)]
struct SimulatedMachine {
    name: MachineName,
    elapsed: Duration,
    ssh: ServiceState,
    bacalhau: ServiceState,
}

/// Invents machines and produces random status updates for them.
#[derive(Debug)]
pub struct MachineEventGenerator {
    rng: StdRng,
    machines: Vec<SimulatedMachine>,
}

impl MachineEventGenerator {
    /// Creates a generator for `count` machines seeded from OS entropy.
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, StdRng::from_entropy())
    }

    /// Creates a deterministic generator, used by tests.
    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::with_rng(count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, mut rng: StdRng) -> Self {
        let mut machines: Vec<SimulatedMachine> = Vec::with_capacity(count);
        while machines.len() < count {
            let name = MachineName::new(format!("i-{:06}", rng.gen_range(0..1_000_000)));
            if machines.iter().any(|m| m.name == name) {
                continue;
            }
            machines.push(SimulatedMachine {
                name,
                elapsed: Duration::ZERO,
                ssh: ServiceState::NotStarted,
                bacalhau: ServiceState::NotStarted,
            });
        }
        Self { rng, machines }
    }

    /// Names of the simulated machines, in creation order.
    pub fn names(&self) -> impl Iterator<Item = &MachineName> {
        self.machines.iter().map(|m| &m.name)
    }

    /// One creation update per machine. The first machine is the orchestrator.
    pub fn initial_updates(&mut self) -> Vec<StatusUpdate> {
        let rng = &mut self.rng;
        self.machines
            .iter()
            .enumerate()
            .map(|(index, machine)| {
                StatusUpdate::vm(machine.name.clone())
                    .with_location(random_region(rng))
                    .with_status_message("Initializing")
                    .with_public_ip(random_ip(rng))
                    .with_private_ip(random_ip(rng))
                    .with_orchestrator(index == 0)
                    .with_ssh(machine.ssh)
                    .with_docker(ServiceState::NotStarted)
                    .with_core_packages(ServiceState::NotStarted)
                    .with_bacalhau(machine.bacalhau)
            })
            .collect()
    }

    /// A random update for a random machine.
    ///
    /// Bumps the elapsed time by up to ten seconds, picks a new status
    /// message and advances ssh, then bacalhau once ssh has finished.
    pub fn next_update(&mut self) -> Option<StatusUpdate> {
        let index = match self.machines.len() {
            0 => return None,
            len => self.rng.gen_range(0..len),
        };
        let rng = &mut self.rng;
        let machine = self.machines.get_mut(index)?;

        machine.elapsed += Duration::from_secs(rng.gen_range(0..10));
        let message = STATUS_MESSAGES.choose(rng).copied().unwrap_or("Running");

        if machine.ssh.is_terminal() {
            machine.bacalhau = next_service_state(machine.bacalhau, rng);
        } else {
            machine.ssh = next_service_state(machine.ssh, rng);
        }

        Some(
            StatusUpdate::vm(machine.name.clone())
                .with_status_message(message)
                .with_elapsed(machine.elapsed)
                .with_ssh(machine.ssh)
                .with_bacalhau(machine.bacalhau),
        )
    }
}

// ============================================================================
// Producer Tasks
// ============================================================================

/// Sends the generator's creation updates, then one random update per
/// `period` until cancelled or the inbox closes.
pub fn spawn_machine_events(
    mut generator: MachineEventGenerator,
    event_tx: mpsc::UnboundedSender<Event>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for update in generator.initial_updates() {
            if event_tx.send(Event::Status(update)).is_err() {
                debug!("inbox closed, machine generator exiting");
                return;
            }
        }

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("machine generator cancelled");
                    return;
                }
                _ = ticker.tick() => {}
            }

            let Some(update) = generator.next_update() else {
                continue;
            };
            if event_tx.send(Event::Status(update)).is_err() {
                debug!("inbox closed, machine generator exiting");
                return;
            }
        }
    })
}

/// Pushes one random log entry into `ring` per `period` until cancelled.
///
/// Every entry is also sampled to the log file under
/// [`GENERATED_LOG_TARGET`].
pub fn spawn_log_generator(
    ring: SharedLogRing,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("log generator cancelled");
                    return;
                }
                _ = ticker.tick() => {}
            }

            let entry = random_log_entry(&mut rng);
            info!(target: GENERATED_LOG_TARGET, "{entry}");
            ring.push(entry);
        }
    })
}
