//! aura-viz: runs one AURA-Viz scenario headless and reports alerts as JSON
//! lines on stdout. Logging goes to stderr, filtered by RUST_LOG.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use aura_core::{Alert, AuraConfig, Datum};
use aura_metrics::MetricsSink;
use aura_monitor::{MonitorDriver, MonitorStore, VitalsMonitor, VitalsSink};
use aura_sim::{AstronautProfile, Scenario};
use clap::{Arg, ArgAction, Command};
use log::{error, info};
use serde_json::{json, Value};

#[derive(Debug)]
struct RunOptions {
    scenario: Scenario,
    profile: AstronautProfile,
    seconds: f64,
    seed: Option<u64>,
    spike_at: Option<f64>,
    realtime: bool,
    config: Option<PathBuf>,
    metrics: bool,
}

fn cli() -> Command {
    Command::new("aura-viz")
        .about("Simulated astronaut vitals with debounced threshold alerts")
        .arg(
            Arg::new("scenario")
                .long("scenario")
                .value_name("ID")
                .default_value("baseline")
                .help("Scenario id; unknown ids fall back to baseline"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .value_name("male|female")
                .default_value("male")
                .help("Astronaut profile"),
        )
        .arg(
            Arg::new("seconds")
                .long("seconds")
                .value_name("N")
                .default_value("30")
                .value_parser(clap::value_parser!(f64))
                .help("Simulated seconds to run"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("RNG seed for a reproducible run"),
        )
        .arg(
            Arg::new("spike-at")
                .long("spike-at")
                .value_name("SECONDS")
                .default_value("5")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64))
                .help("Trigger the manual alert spike at this simulated time; negative disables"),
        )
        .arg(
            Arg::new("realtime")
                .long("realtime")
                .action(ArgAction::SetTrue)
                .help("Pace ticks on the wall clock instead of running as fast as possible"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("JSON file with simulation and alert tunables"),
        )
        .arg(
            Arg::new("metrics")
                .long("metrics")
                .action(ArgAction::SetTrue)
                .help("Print the Prometheus text exposition after the run"),
        )
        .arg(
            Arg::new("list-scenarios")
                .long("list-scenarios")
                .action(ArgAction::SetTrue)
                .help("List the available scenarios and exit"),
        )
}

fn parse_options(matches: &clap::ArgMatches) -> Result<RunOptions> {
    let scenario_id = matches
        .get_one::<String>("scenario")
        .map(String::as_str)
        .unwrap_or("baseline");
    let profile = matches
        .get_one::<String>("profile")
        .map(String::as_str)
        .unwrap_or("male")
        .parse::<AstronautProfile>()
        .map_err(|e| anyhow!(e))?;
    let seconds = matches.get_one::<f64>("seconds").copied().unwrap_or(30.0);
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(anyhow!("--seconds must be a positive number, got {seconds}"));
    }
    let spike_at = matches
        .get_one::<f64>("spike-at")
        .copied()
        .filter(|t| *t >= 0.0);
    as_duration("--seconds", seconds)?;
    if let Some(t) = spike_at {
        as_duration("--spike-at", t)?;
    }

    Ok(RunOptions {
        scenario: Scenario::from_id(scenario_id),
        profile,
        seconds,
        seed: matches.get_one::<u64>("seed").copied(),
        spike_at,
        realtime: matches.get_flag("realtime"),
        config: matches.get_one::<String>("config").map(PathBuf::from),
        metrics: matches.get_flag("metrics"),
    })
}

fn as_duration(flag: &str, seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("{flag} {seconds} is out of range"))
}

fn emit(line: Value) {
    println!("{line}");
}

/// Store that also reports every alert event as a JSON line.
#[derive(Default)]
struct JsonLines {
    store: MonitorStore,
}

impl VitalsSink for JsonLines {
    fn on_data(&mut self, datum: &Datum) {
        self.store.on_data(datum);
    }

    fn on_alert(&mut self, alert: &Alert) {
        match serde_json::to_value(alert) {
            Ok(alert_json) => emit(json!({ "event": "alert", "alert": alert_json })),
            Err(e) => error!("could not serialise alert {}: {e}", alert.id),
        }
        self.store.on_alert(alert);
    }

    fn on_alert_cleared(&mut self, alert_id: &str) {
        let at = self.store.measurements().last().map(|m| m.timestamp);
        emit(json!({ "event": "alert-cleared", "id": alert_id, "timestamp": at }));
        self.store.on_alert_cleared(alert_id);
    }

    fn on_critical_changed(&mut self, active: bool) {
        emit(json!({ "event": "critical", "active": active }));
    }
}

fn load_config(opts: &RunOptions) -> Result<AuraConfig> {
    let mut config = match &opts.config {
        Some(path) => AuraConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AuraConfig::default(),
    };
    if opts.seed.is_some() {
        config.simulation.seed = opts.seed;
    }
    Ok(config)
}

fn ticks_for(seconds: f64, tick_interval_ms: u64) -> u64 {
    (seconds * 1_000.0 / tick_interval_ms.max(1) as f64).round() as u64
}

fn run_simulated(monitor: &mut VitalsMonitor<MetricsSink<JsonLines>>, opts: &RunOptions) {
    let interval = monitor.engine().config().tick_interval_ms;
    let total = ticks_for(opts.seconds, interval);
    let spike_tick = opts.spike_at.map(|t| ticks_for(t, interval));
    for tick in 0..total {
        if spike_tick == Some(tick) {
            monitor.trigger_alert_spike();
        }
        monitor.tick();
    }
}

async fn run_realtime(
    monitor: VitalsMonitor<MetricsSink<JsonLines>>,
    opts: &RunOptions,
) -> Result<VitalsMonitor<MetricsSink<JsonLines>>> {
    let mut handle = MonitorDriver::spawn(monitor);
    let total = as_duration("--seconds", opts.seconds)?;
    let spike = opts
        .spike_at
        .map(|t| as_duration("--spike-at", t))
        .transpose()?;
    match spike {
        Some(spike) if spike < total => {
            tokio::time::sleep(spike).await;
            handle.trigger_alert_spike()?;
            tokio::time::sleep(total - spike).await;
        }
        _ => tokio::time::sleep(total).await,
    }
    handle
        .stop()
        .await?
        .ok_or_else(|| anyhow!("monitor driver was already stopped"))
}

fn summary(monitor: &VitalsMonitor<MetricsSink<JsonLines>>, opts: &RunOptions) -> Value {
    let store = &monitor.sink().inner().store;
    json!({
        "event": "summary",
        "scenario": opts.scenario.id(),
        "profile": opts.profile.to_string(),
        "ticks": monitor.engine().ticks(),
        "simulatedSeconds": monitor.engine().time(),
        "measurements": store.measurements().len(),
        "waveformsHeld": store.waveforms().count(),
        "alertsRaised": store.alerts_raised(),
        "alertsActive": store.alerts().iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
        "criticalActive": monitor.is_critical_active(),
        "degradedChannels": store.degraded_channels(),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let matches = cli().get_matches();

    if matches.get_flag("list-scenarios") {
        for scenario in Scenario::ALL {
            emit(json!({
                "id": scenario.id(),
                "name": scenario.name(),
                "description": scenario.description(),
            }));
        }
        return Ok(());
    }

    let opts = parse_options(&matches)?;
    let config = load_config(&opts)?;
    let sink = MetricsSink::new(JsonLines::default()).context("registering metrics")?;
    let mut monitor = VitalsMonitor::new(&config, sink);
    monitor.set_profile(opts.profile);
    monitor.start(opts.scenario);
    info!(
        "running {} for {}s ({})",
        opts.scenario,
        opts.seconds,
        if opts.realtime { "realtime" } else { "simulated" }
    );

    if opts.realtime {
        monitor = run_realtime(monitor, &opts).await?;
    } else {
        run_simulated(&mut monitor, &opts);
        monitor.stop();
    }

    emit(summary(&monitor, &opts));
    if opts.metrics {
        print!("{}", monitor.sink().metrics().gather_text()?);
    }
    Ok(())
}
