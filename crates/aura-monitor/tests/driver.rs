use aura_core::{AuraConfig, AuraError};
use aura_monitor::{MonitorDriver, MonitorStore, VitalsMonitor};
use aura_sim::{AstronautProfile, RunState, Scenario};
use std::time::Duration;

fn monitor(seed: u64) -> VitalsMonitor<MonitorStore> {
    let mut config = AuraConfig::default();
    config.simulation.seed = Some(seed);
    let mut monitor = VitalsMonitor::new(&config, MonitorStore::new());
    monitor.start(Scenario::Baseline);
    monitor
}

#[tokio::test(start_paused = true)]
async fn driver_ticks_once_per_interval() {
    let mut handle = MonitorDriver::spawn(monitor(1));
    tokio::time::sleep(Duration::from_millis(1_050)).await;
    let monitor = handle.stop().await.unwrap().expect("first stop returns the monitor");

    let ticks = monitor.engine().ticks();
    assert!((9..=11).contains(&ticks), "{ticks}");
    assert_eq!(monitor.engine().run_state(), RunState::Stopped);
    let delivered = monitor.sink().measurements().len() + monitor.sink().waveforms().count();
    assert!(delivered > 0);
}

#[tokio::test(start_paused = true)]
async fn paused_driver_keeps_the_clock() {
    let mut handle = MonitorDriver::spawn(monitor(2));
    tokio::time::sleep(Duration::from_millis(550)).await;
    handle.pause().unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    handle.resume().unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    let monitor = handle.stop().await.unwrap().unwrap();

    // about 5 ticks before the pause and 2 after; none during the 5 s pause
    let ticks = monitor.engine().ticks();
    assert!((6..=9).contains(&ticks), "{ticks}");
}

#[tokio::test(start_paused = true)]
async fn commands_reach_the_monitor_between_ticks() {
    let mut handle = MonitorDriver::spawn(monitor(3));
    handle.set_profile(AstronautProfile::Female).unwrap();
    handle.trigger_alert_spike().unwrap();
    tokio::time::sleep(Duration::from_millis(350)).await;
    let monitor = handle.stop().await.unwrap().unwrap();

    assert_eq!(monitor.engine().profile(), AstronautProfile::Female);
    assert!(monitor.engine().spike().active);
}

#[tokio::test(start_paused = true)]
async fn reset_and_restart_rewind_the_clock() {
    let mut handle = MonitorDriver::spawn(monitor(4));
    tokio::time::sleep(Duration::from_millis(2_050)).await;
    handle.reset().unwrap();
    handle.start(Scenario::MotionSickness).unwrap();
    tokio::time::sleep(Duration::from_millis(320)).await;
    let monitor = handle.stop().await.unwrap().unwrap();

    assert_eq!(monitor.engine().scenario(), Scenario::MotionSickness);
    assert!(monitor.engine().ticks() <= 4, "{}", monitor.engine().ticks());
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent_and_closes_the_handle() {
    let mut handle = MonitorDriver::spawn(monitor(5));
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(handle.is_running());

    assert!(handle.stop().await.unwrap().is_some());
    assert!(handle.stop().await.unwrap().is_none());
    assert!(!handle.is_running());
    assert!(matches!(handle.pause(), Err(AuraError::DriverClosed)));
}
