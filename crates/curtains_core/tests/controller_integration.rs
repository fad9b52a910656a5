//! Integration tests for the transition controller
//!
//! These tests drive the controller the way a host frame loop does:
//! 1. Presets loaded from RON text
//! 2. Frame steps of varying size
//! 3. Waiting on completion while the loop keeps ticking

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use curtains_core::{
    AnimationCurve, Color, CurtainsSink, MaterialParams, PlayOutcome, Preset, TextureRef,
    TransitionController,
};

const EPSILON: f32 = 1e-5;

fn linear_preset(duration: f32) -> Preset {
    Preset::new()
        .with_duration(duration)
        .with_cutoff_curve(AnimationCurve::linear(0.0, 0.0, 1.0, 1.0))
        .with_fade_curve(AnimationCurve::linear(0.0, 0.0, 1.0, 1.0))
}

struct CountingWaker(AtomicUsize);

impl Wake for CountingWaker {
    fn wake(self: Arc<Self>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sink that records every write, to check what each operation pushes
#[derive(Default)]
struct RecordingSink {
    writes: Vec<&'static str>,
}

impl CurtainsSink for RecordingSink {
    fn set_cutoff(&mut self, _cutoff: f32) {
        self.writes.push("cutoff");
    }
    fn set_fade(&mut self, _fade: f32) {
        self.writes.push("fade");
    }
    fn set_color(&mut self, _color: Color) {
        self.writes.push("color");
    }
    fn set_distort(&mut self, _distort: bool) {
        self.writes.push("distort");
    }
    fn set_texture(&mut self, _texture: Option<&TextureRef>) {
        self.writes.push("texture");
    }
}

// ==================== Timing ====================

/// Any split of exactly the duration finishes the transition
#[test]
fn test_exact_duration_in_any_split_finishes() {
    let splits: [&[f32]; 4] = [
        &[2.0],
        &[1.0, 1.0],
        &[0.5, 0.25, 0.25, 1.0],
        &[0.125; 16],
    ];

    for steps in splits {
        let mut curtains = TransitionController::new(MaterialParams::new());
        curtains.play(&linear_preset(2.0)).unwrap();
        for (i, &dt) in steps.iter().enumerate() {
            assert!(!curtains.is_finished(), "finished early at step {} of {:?}", i, steps);
            curtains.advance(dt);
        }
        assert!(curtains.is_finished(), "not finished after {:?}", steps);
        assert!((curtains.sink().cutoff - 1.0).abs() < EPSILON);
    }
}

/// Frame steps that are not exact in binary still finish on the last frame
#[test]
fn test_inexact_splits_finish_on_last_frame() {
    let cases: [(f32, Vec<f32>); 4] = [
        (0.3, vec![0.1; 3]),
        (2.0, vec![1.0 / 60.0; 120]),
        (1.0, vec![1.0 / 7.0; 7]),
        (1.5, vec![1.5 / 7.0; 7]),
    ];

    for (duration, steps) in cases {
        let mut curtains = TransitionController::new(MaterialParams::new());
        curtains.play(&linear_preset(duration)).unwrap();
        for (i, &dt) in steps.iter().enumerate() {
            assert!(
                !curtains.is_finished(),
                "d={} finished early at step {} of {}",
                duration,
                i,
                steps.len()
            );
            curtains.advance(dt);
        }
        assert!(
            curtains.is_finished(),
            "d={} not finished after {} steps of {}",
            duration,
            steps.len(),
            steps[0]
        );
        assert_eq!(curtains.sink().cutoff, 1.0);
        assert_eq!(curtains.sink().fade, 1.0);
    }
}

#[test]
fn test_reversed_preset_from_ron() {
    let preset = Preset::from_ron(
        r#"(
            duration: 2.0,
            cutoff_curve: [
                (time: 0.0, value: 0.0, in_tangent: 1.0, out_tangent: 1.0),
                (time: 1.0, value: 1.0, in_tangent: 1.0, out_tangent: 1.0),
            ],
            reversed: true,
        )"#,
    )
    .unwrap();

    let mut curtains = TransitionController::new(MaterialParams::new());
    curtains.play(&preset).unwrap();
    assert_eq!(curtains.progress(), Some(1.0));

    curtains.advance(0.5);
    assert!((curtains.sink().cutoff - 0.75).abs() < EPSILON);
    // Default fade curve holds at 1
    assert!((curtains.sink().fade - 1.0).abs() < EPSILON);

    curtains.advance(1.5);
    assert!(curtains.is_finished());
    assert!(curtains.sink().cutoff.abs() < EPSILON);
}

#[test]
fn test_later_preset_mutation_does_not_leak() {
    let mut preset = linear_preset(2.0);
    let mut curtains = TransitionController::new(MaterialParams::new());
    curtains.play(&preset).unwrap();

    preset.cutoff_curve = AnimationCurve::constant(0.0);
    preset.duration = 100.0;

    curtains.advance(1.0);
    assert!((curtains.sink().cutoff - 0.5).abs() < EPSILON);
}

// ==================== Sink writes ====================

#[test]
fn test_parameter_write_schedule() {
    let mut curtains = TransitionController::new(RecordingSink::default());
    assert_eq!(curtains.sink().writes, vec!["cutoff", "fade"]);
    curtains.sink_mut().writes.clear();

    curtains.play(&linear_preset(1.0)).unwrap();
    assert_eq!(curtains.sink().writes, vec!["distort", "color", "texture"]);
    curtains.sink_mut().writes.clear();

    curtains.advance(0.25);
    assert_eq!(curtains.sink().writes, vec!["cutoff", "fade"]);
    curtains.sink_mut().writes.clear();

    // Ignored play and reset while running write nothing
    assert_eq!(
        curtains.play(&linear_preset(1.0)).unwrap(),
        PlayOutcome::Ignored
    );
    curtains.reset_visual();
    assert!(curtains.sink().writes.is_empty());

    curtains.cancel();
    assert_eq!(curtains.sink().writes, vec!["cutoff", "fade"]);
}

#[test]
fn test_double_play_matches_single_play() {
    let preset = linear_preset(2.0).with_color(Color::WHITE).distorted(true);

    let mut once = TransitionController::new(MaterialParams::new());
    once.play(&preset).unwrap();

    let mut twice = TransitionController::new(MaterialParams::new());
    twice.play(&preset).unwrap();
    twice.play(&preset).unwrap();

    assert_eq!(once.sink(), twice.sink());
    assert_eq!(once.state().time_remaining(), twice.state().time_remaining());
    assert_eq!(once.is_finished(), twice.is_finished());
}

// ==================== Waiting ====================

#[test]
fn test_wait_resolves_on_completion_not_before() {
    let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
    let waker = Waker::from(counter.clone());
    let mut cx = Context::from_waker(&waker);

    let mut curtains = TransitionController::new(MaterialParams::new());
    curtains.play(&linear_preset(1.0)).unwrap();
    let mut wait = curtains.wait_for_finished();

    for _ in 0..3 {
        assert_eq!(Pin::new(&mut wait).poll(&mut cx), Poll::Pending);
        curtains.advance(0.25);
    }
    assert_eq!(counter.0.load(Ordering::SeqCst), 0);

    curtains.advance(0.25);
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    assert_eq!(Pin::new(&mut wait).poll(&mut cx), Poll::Ready(()));
}

#[test]
fn test_wait_resolves_on_cancel() {
    let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
    let waker = Waker::from(counter.clone());
    let mut cx = Context::from_waker(&waker);

    let mut curtains = TransitionController::new(MaterialParams::new());
    curtains.play(&linear_preset(10.0)).unwrap();
    let mut wait = curtains.wait_for_finished();
    assert_eq!(Pin::new(&mut wait).poll(&mut cx), Poll::Pending);

    curtains.cancel();
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    assert_eq!(Pin::new(&mut wait).poll(&mut cx), Poll::Ready(()));
}

#[test]
fn test_wait_restarts_for_next_transition() {
    let mut curtains = TransitionController::new(MaterialParams::new());
    curtains.play(&linear_preset(0.5)).unwrap();
    let first = curtains.wait_for_finished();
    curtains.advance(0.5);
    assert!(first.is_ready());

    curtains.play(&linear_preset(0.5)).unwrap();
    let second = curtains.wait_for_finished();
    assert!(!second.is_ready());
    curtains.advance(0.5);
    pollster::block_on(second);
}
