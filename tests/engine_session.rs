use revline_core::config::EngineConfig;
use revline_core::dsp::{EngineSynth, SignalGenerator};
use revline_core::engine::{EngineState, ScrollDirection};
use revline_core::{ControlEvent, EngineError, EngineStatus, PresetId, Waveform};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn synth_engine() -> EngineState<EngineSynth> {
    let config = EngineConfig::default();
    let synth = EngineSynth::new(config.sample_rate);
    EngineState::new(config, synth).expect("default config is valid")
}

#[test]
fn full_session_with_builtin_synth() {
    init_logger();
    let mut engine = synth_engine();

    engine
        .dispatch(ControlEvent::SelectPreset { name: "ferrari".into() })
        .unwrap();
    assert_eq!(engine.dispatch(ControlEvent::Start).unwrap().map(|s| s.rpm), Some(80));
    assert!(engine.generator().is_initialized());

    for _ in 0..25 {
        engine
            .dispatch(ControlEvent::Scroll { direction: ScrollDirection::Up })
            .unwrap();
    }
    let readout = engine.readout();
    assert_eq!(readout.status, EngineStatus::Running);
    assert_eq!(readout.waveform, Waveform::Square);
    assert_eq!(readout.rpm, 2040); // 25 ticks of 0.02 = half throttle
    assert_eq!(readout.speed, 20);

    // 1 sample from start + 25 from scrolling, capped at 20.
    let indices: Vec<u64> = readout.history.iter().map(|s| s.index).collect();
    assert_eq!(indices, (6..=25).collect::<Vec<u64>>());

    // The synth glides from base toward the new target.
    assert_eq!(engine.generator().target_frequency().map(f64::round), Some(2040.0));
    let block = engine.generator_mut().render(22050);
    assert!(block.iter().all(|s| s.abs() <= 0.2 * 1.5));
    let f = engine.generator().frequency().unwrap();
    assert!((f - 2040.0).abs() < 10.0, "glide should have settled, got {f}");
}

#[test]
fn failed_audio_start_keeps_engine_idle() {
    init_logger();
    let config = EngineConfig::default();
    let mut engine = EngineState::new(config, EngineSynth::new(f64::NAN)).unwrap();

    engine.dispatch(ControlEvent::SetThrottle { value: 0.5 }).unwrap();
    let err = engine.dispatch(ControlEvent::Start).unwrap_err();
    assert!(matches!(err, EngineError::AudioInitializationFailure(_)));
    assert_eq!(engine.status(), EngineStatus::Idle);
    assert!(engine.history().is_empty());
    assert!(engine.generator_mut().render(64).iter().all(|&s| s == 0.0));
}

#[test]
fn json_driven_session() {
    init_logger();
    let mut engine = synth_engine();
    let script = [
        r#"{"type":"setThrottle","value":1.0}"#,
        r#"{"type":"start"}"#,
        r#"{"type":"selectPreset","name":"tesla"}"#,
    ];
    for line in script {
        engine.dispatch_json(line).unwrap();
    }
    assert_eq!(engine.preset_id(), PresetId::Tesla);
    let latest = engine.history().latest().copied().unwrap();
    assert_eq!((latest.index, latest.rpm, latest.speed), (1, 1500, 15));

    // Waveform stays as started even after switching presets.
    assert_eq!(engine.readout().waveform, Waveform::Sawtooth);
}

#[test]
fn custom_history_capacity() {
    let config = EngineConfig::from_json(r#"{"historyCapacity":5,"scrollStep":0.1}"#).unwrap();
    let mut engine = EngineState::new(config, EngineSynth::new(48000.0)).unwrap();
    engine.start().unwrap();
    for _ in 0..12 {
        engine.scroll(ScrollDirection::Up);
        engine.recompute();
    }
    assert_eq!(engine.history().len(), 5);
    assert_eq!(engine.throttle(), 1.0);
    assert_eq!(engine.history().next_index(), 12);
}

#[test]
fn generator_trait_is_object_safe() {
    let boxed: Box<dyn SignalGenerator> = Box::new(EngineSynth::new(44100.0));
    let mut engine = EngineState::with_generator(boxed);
    assert!(engine.start().unwrap());
    assert!(engine.recompute().is_some());
}
