//! MonitorService → indicator integration.

use nursery_monitor::app::events::AppEvent;
use nursery_monitor::app::service::MonitorService;
use nursery_monitor::config::MonitorConfig;
use nursery_monitor::decision::IndicatorState;
use nursery_monitor::drivers::status_led::Line;
use nursery_monitor::error::{Error, SensorError};
use nursery_monitor::sensors::temperature::{Calibration, Temperature};

use crate::mock_hw::{IndicatorCall, MockDelay, MockHardware, RecordingSink};

fn raw_for(fahrenheit: f32) -> u16 {
    Calibration::default()
        .sample_for(Temperature::from_fahrenheit(fahrenheit))
        .round() as u16
}

fn one_cycle(hw: &mut MockHardware) -> (MonitorService, RecordingSink) {
    let mut svc = MonitorService::new(MonitorConfig::default()).unwrap();
    let mut sink = RecordingSink::default();
    let mut delay = MockDelay::default();
    svc.start(hw, &mut sink).unwrap();
    svc.run_cycle(hw, &mut delay, &mut sink).unwrap();
    (svc, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_darkens_lines_and_configures_once() {
    let mut hw = MockHardware::steady(0);
    let mut svc = MonitorService::new(MonitorConfig::default()).unwrap();
    let mut sink = RecordingSink::default();

    svc.start(&mut hw, &mut sink).unwrap();

    assert_eq!(hw.calls, vec![IndicatorCall::AllOff]);
    assert_eq!(hw.configure_count, 1);
    assert_eq!(hw.lines(), (false, false, false));
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started]));
    assert_eq!(svc.state(), None);
}

// ── Full decision cycles ──────────────────────────────────────

#[test]
fn full_scale_sample_is_hot_alert() {
    let mut hw = MockHardware::steady(1023);
    let (svc, _) = one_cycle(&mut hw);

    assert_eq!(svc.state(), Some(IndicatorState::HotAlert));
    assert_eq!(hw.blinks(), vec![(Line::Red, 10)]);
    assert_eq!(hw.lines(), (true, false, false));
}

#[test]
fn zero_sample_is_cold_alert() {
    let mut hw = MockHardware::steady(0);
    let (svc, _) = one_cycle(&mut hw);

    assert_eq!(svc.state(), Some(IndicatorState::ColdAlert));
    assert_eq!(hw.blinks(), vec![(Line::Blue, 10)]);
    assert_eq!(hw.lines(), (false, false, true));
}

#[test]
fn room_temperature_lights_everything() {
    let mut hw = MockHardware::steady(raw_for(68.0));
    let (svc, sink) = one_cycle(&mut hw);

    assert_eq!(svc.state(), Some(IndicatorState::Comfortable));
    assert!(hw.blinks().is_empty());
    assert_eq!(hw.lines(), (true, true, true));

    let report = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::CycleCompleted(r) => Some(r.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(report.cycle, 1);
    assert_eq!(report.reads.len(), 16);
    assert_eq!(report.spread(), 0);
    assert!((report.temperature.fahrenheit() - 68.0).abs() < 1.0);
}

#[test]
fn warm_and_cool_bands_light_single_line_without_blink() {
    let mut hot = MockHardware::steady(raw_for(72.5));
    let (svc, _) = one_cycle(&mut hot);
    assert_eq!(svc.state(), Some(IndicatorState::Hot));
    assert!(hot.blinks().is_empty());
    assert_eq!(hot.lines(), (true, false, false));

    let mut cold = MockHardware::steady(raw_for(63.5));
    let (svc, _) = one_cycle(&mut cold);
    assert_eq!(svc.state(), Some(IndicatorState::Cold));
    assert!(cold.blinks().is_empty());
    assert_eq!(cold.lines(), (false, false, true));
}

#[test]
fn cycle_takes_sixteen_reads_each_followed_by_a_second() {
    let mut hw = MockHardware::steady(raw_for(68.0));
    let mut svc = MonitorService::new(MonitorConfig::default()).unwrap();
    let mut sink = RecordingSink::default();
    let mut delay = MockDelay::default();

    svc.start(&mut hw, &mut sink).unwrap();
    svc.run_cycle(&mut hw, &mut delay, &mut sink).unwrap();

    assert_eq!(hw.reads_taken, 16);
    assert_eq!(delay.total_ms, 16_000);
    // 1 s pause in 100 ms units.
    assert_eq!(delay.calls, 160);
}

#[test]
fn decision_uses_mean_of_all_reads() {
    // Half full-scale, half zero: the mean (511.5) sits near 2°F even
    // though the peak read alone would be HOT_ALERT.
    let script = (0..16).map(|i| Ok(if i % 2 == 0 { 1023 } else { 0 }));
    let mut hw = MockHardware::scripted(script, 0);
    let (svc, sink) = one_cycle(&mut hw);

    assert_eq!(svc.state(), Some(IndicatorState::ColdAlert));
    let report = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::CycleCompleted(r) => Some(r.clone()),
            _ => None,
        })
        .unwrap();
    assert!((report.smoothed - 511.5).abs() < 1e-3);
    assert_eq!(report.spread(), 1023);
}

// ── Apply ordering ────────────────────────────────────────────

#[test]
fn apply_clears_dark_lines_before_blinking() {
    let mut hw = MockHardware::steady(0);
    let svc = MonitorService::new(MonitorConfig::default()).unwrap();

    svc.apply(IndicatorState::ColdAlert, &mut hw).unwrap();

    assert_eq!(
        hw.calls,
        vec![
            IndicatorCall::Set { line: Line::Red, on: false },
            IndicatorCall::Set { line: Line::Green, on: false },
            IndicatorCall::Blink { line: Line::Blue, count: 10 },
            IndicatorCall::Set { line: Line::Blue, on: true },
        ]
    );
}

#[test]
fn apply_hot_leaves_only_red() {
    let mut hw = MockHardware::steady(0);
    let svc = MonitorService::new(MonitorConfig::default()).unwrap();

    svc.apply(IndicatorState::Comfortable, &mut hw).unwrap();
    assert_eq!(hw.lines(), (true, true, true));

    svc.apply(IndicatorState::Hot, &mut hw).unwrap();
    assert_eq!(hw.lines(), (true, false, false));
}

#[test]
fn apply_respects_configured_blink_count() {
    let config = MonitorConfig {
        alert_blink_count: 3,
        ..MonitorConfig::default()
    };
    let svc = MonitorService::new(config).unwrap();
    let mut hw = MockHardware::steady(0);

    svc.apply(IndicatorState::HotAlert, &mut hw).unwrap();
    assert_eq!(hw.blinks(), vec![(Line::Red, 3)]);
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn state_change_emitted_only_on_transition() {
    let mut hw = MockHardware::steady(raw_for(68.0));
    let mut svc = MonitorService::new(MonitorConfig::default()).unwrap();
    let mut sink = RecordingSink::default();
    let mut delay = MockDelay::default();
    svc.start(&mut hw, &mut sink).unwrap();

    svc.run_cycle(&mut hw, &mut delay, &mut sink).unwrap();
    svc.run_cycle(&mut hw, &mut delay, &mut sink).unwrap();
    assert_eq!(sink.state_changes(), 1);

    let mut hot = MockHardware::steady(1023);
    svc.run_cycle(&mut hot, &mut delay, &mut sink).unwrap();
    assert_eq!(sink.state_changes(), 2);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::StateChanged {
            from: Some(IndicatorState::Comfortable),
            to: IndicatorState::HotAlert,
        }
    )));
    assert_eq!(svc.cycle_count(), 3);
}

// ── Cycle sizing ──────────────────────────────────────────────

#[test]
fn out_of_range_cycle_size_is_rejected_before_sampling() {
    for reads_per_cycle in [0, 20] {
        let config = MonitorConfig {
            reads_per_cycle,
            ..MonitorConfig::default()
        };
        let err = MonitorService::new(config).err().unwrap();
        assert!(matches!(err, Error::Config(_)), "{reads_per_cycle}: {err}");
    }
}

#[test]
fn short_cycle_keeps_every_read() {
    let config = MonitorConfig {
        reads_per_cycle: 4,
        ..MonitorConfig::default()
    };
    let script = [Ok(584), Ok(584), Ok(584), Ok(1023)];
    let mut hw = MockHardware::scripted(script, 0);
    let mut svc = MonitorService::new(config).unwrap();
    let mut sink = RecordingSink::default();
    let mut delay = MockDelay::default();
    svc.start(&mut hw, &mut sink).unwrap();

    let report = svc.run_cycle(&mut hw, &mut delay, &mut sink).unwrap();

    assert_eq!(hw.reads_taken, 4);
    assert_eq!(report.reads.as_slice(), &[584, 584, 584, 1023]);
    assert!((report.smoothed - 693.75).abs() < 1e-3);
    assert_eq!(delay.total_ms, 4_000);
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn sensor_fault_darkens_and_reports() {
    let script = [Ok(584), Ok(584), Err(SensorError::ConversionTimeout)];
    let mut hw = MockHardware::scripted(script, 584);
    let mut svc = MonitorService::new(MonitorConfig::default()).unwrap();
    let mut sink = RecordingSink::default();
    let mut delay = MockDelay::default();
    svc.start(&mut hw, &mut sink).unwrap();

    let err = svc.run_cycle(&mut hw, &mut delay, &mut sink).unwrap_err();

    assert_eq!(err, Error::Sensor(SensorError::ConversionTimeout));
    assert_eq!(sink.faults(), vec![SensorError::ConversionTimeout]);
    assert_eq!(hw.reads_taken, 3);
    assert_eq!(hw.lines(), (false, false, false));
    assert_eq!(svc.state(), None);
    assert!(
        !sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::CycleCompleted(_)))
    );
}

#[test]
fn cycle_after_fault_recovers() {
    let mut hw = MockHardware::scripted([Err(SensorError::ConversionTimeout)], 1023);
    let mut svc = MonitorService::new(MonitorConfig::default()).unwrap();
    let mut sink = RecordingSink::default();
    let mut delay = MockDelay::default();
    svc.start(&mut hw, &mut sink).unwrap();

    assert!(svc.run_cycle(&mut hw, &mut delay, &mut sink).is_err());
    let report = svc.run_cycle(&mut hw, &mut delay, &mut sink).unwrap();

    assert_eq!(report.state, IndicatorState::HotAlert);
    assert_eq!(report.cycle, 2);
    assert_eq!(hw.lines(), (true, false, false));
    // Fresh state after the fault, so the transition is reported again.
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::StateChanged {
            from: None,
            to: IndicatorState::HotAlert,
        }
    )));
}
