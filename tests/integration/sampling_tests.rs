//! Simulated board → MonitorService end to end.
//!
//! Only this file touches the simulated ADC code, so the tests share it
//! behind a lock.

use std::sync::Mutex;

use nursery_monitor::adapters::hardware::HardwareAdapter;
use nursery_monitor::app::service::MonitorService;
use nursery_monitor::config::MonitorConfig;
use nursery_monitor::decision::IndicatorState;
use nursery_monitor::drivers::adc::sim_set_temp_adc;

use crate::mock_hw::{MockDelay, RecordingSink};

static SIM_ADC: Mutex<()> = Mutex::new(());

fn quick_config() -> MonitorConfig {
    MonitorConfig {
        blink_half_period_ms: 0,
        ..MonitorConfig::default()
    }
}

fn decide(raw: u16) -> (IndicatorState, (bool, bool, bool)) {
    let _guard = SIM_ADC.lock().unwrap_or_else(|e| e.into_inner());
    sim_set_temp_adc(raw);

    let config = quick_config();
    let mut hw = HardwareAdapter::from_config(&config);
    let mut svc = MonitorService::new(config).unwrap();
    let mut sink = RecordingSink::default();
    let mut delay = MockDelay::default();

    svc.start(&mut hw, &mut sink).unwrap();
    let report = svc.run_cycle(&mut hw, &mut delay, &mut sink).unwrap();
    assert_eq!(delay.total_ms, 16_000);
    (report.state, hw.indicator())
}

#[test]
fn simulated_board_full_scale_is_hot_alert() {
    let (state, lines) = decide(1023);
    assert_eq!(state, IndicatorState::HotAlert);
    assert_eq!(lines, (true, false, false));
}

#[test]
fn simulated_board_room_temperature() {
    let (state, lines) = decide(584);
    assert_eq!(state, IndicatorState::Comfortable);
    assert_eq!(lines, (true, true, true));
}

#[test]
fn simulated_board_zero_is_cold_alert() {
    let (state, lines) = decide(0);
    assert_eq!(state, IndicatorState::ColdAlert);
    assert_eq!(lines, (false, false, true));
}
