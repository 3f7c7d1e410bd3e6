use crate::monitor::VitalsMonitor;
use crate::sink::VitalsSink;
use aura_core::AuraError;
use aura_sim::{AstronautProfile, Scenario};
use log::{debug, error, info};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Start(Scenario),
    Pause,
    Resume,
    TriggerAlertSpike,
    SetProfile(AstronautProfile),
    Reset,
    Stop,
}

/// Paces a `VitalsMonitor` on a tokio task at the configured tick interval.
pub struct MonitorDriver;

impl MonitorDriver {
    /// Moves `monitor` onto a new task. Commands sent through the returned
    /// handle are applied between ticks.
    pub fn spawn<S>(monitor: VitalsMonitor<S>) -> MonitorHandle<S>
    where
        S: VitalsSink + 'static,
    {
        let period = Duration::from_millis(monitor.engine().config().tick_interval_ms.max(1));
        let (commands, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(monitor, period, rx));
        info!("monitor driver started, period {period:?}");
        MonitorHandle {
            commands,
            task: Some(task),
        }
    }
}

async fn run<S: VitalsSink>(
    mut monitor: VitalsMonitor<S>,
    period: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
) -> VitalsMonitor<S> {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            command = commands.recv() => match command {
                Some(Command::Stop) | None => {
                    monitor.stop();
                    break;
                }
                Some(command) => apply(&mut monitor, command),
            },
            _ = interval.tick() => {
                monitor.tick();
            }
        }
    }
    info!("monitor driver stopped at t={:.1}s", monitor.engine().time());
    monitor
}

fn apply<S: VitalsSink>(monitor: &mut VitalsMonitor<S>, command: Command) {
    debug!("driver command {command:?}");
    match command {
        Command::Start(scenario) => monitor.start(scenario),
        Command::Pause => monitor.pause(),
        Command::Resume => monitor.resume(),
        Command::TriggerAlertSpike => monitor.trigger_alert_spike(),
        Command::SetProfile(profile) => monitor.set_profile(profile),
        Command::Reset => monitor.reset(),
        Command::Stop => monitor.stop(),
    }
}

/// Control surface for a running driver.
pub struct MonitorHandle<S> {
    commands: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<VitalsMonitor<S>>>,
}

impl<S> MonitorHandle<S> {
    fn send(&self, command: Command) -> Result<(), AuraError> {
        self.commands.send(command).map_err(|_| AuraError::DriverClosed)
    }

    pub fn start(&self, scenario: Scenario) -> Result<(), AuraError> {
        self.send(Command::Start(scenario))
    }

    pub fn pause(&self) -> Result<(), AuraError> {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> Result<(), AuraError> {
        self.send(Command::Resume)
    }

    pub fn trigger_alert_spike(&self) -> Result<(), AuraError> {
        self.send(Command::TriggerAlertSpike)
    }

    pub fn set_profile(&self, profile: AstronautProfile) -> Result<(), AuraError> {
        self.send(Command::SetProfile(profile))
    }

    pub fn reset(&self) -> Result<(), AuraError> {
        self.send(Command::Reset)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }

    /// Stops the loop and waits for it, handing the monitor back. No sink
    /// callback fires once this returns. Later calls return `Ok(None)`.
    pub async fn stop(&mut self) -> Result<Option<VitalsMonitor<S>>, AuraError> {
        let Some(task) = self.task.take() else {
            return Ok(None);
        };
        // a closed channel means the loop is already on its way out
        let _ = self.commands.send(Command::Stop);
        match task.await {
            Ok(monitor) => Ok(Some(monitor)),
            Err(e) => {
                error!("monitor driver task failed: {e}");
                Err(AuraError::DriverClosed)
            }
        }
    }
}
