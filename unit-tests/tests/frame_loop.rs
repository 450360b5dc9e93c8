//! Frame loop against recording doubles.

use embassy_futures::block_on;
use embassy_time::Duration;
use fire_composer::{
    EffectImpl, FireConfig, FireEffect, FrameLoop, FrameState, NoIndicator, PowerConfig, Rgb,
};
use tests::{FailingDriver, RecordingDriver, RecordingIndicator};

const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Paints every pixel white
struct Floodlight;

impl<const N: usize> EffectImpl<N> for Floodlight {
    fn render(&mut self, frame: &mut [Rgb; N]) {
        frame.fill(WHITE);
    }
}

/// Adds to the first pixel, so a stale buffer would show up as growth
struct Accumulator;

impl<const N: usize> EffectImpl<N> for Accumulator {
    fn render(&mut self, frame: &mut [Rgb; N]) {
        frame[0].r = frame[0].r.saturating_add(10);
    }
}

fn fire_loop(
    seed: u64,
) -> FrameLoop<RecordingDriver<20>, RecordingIndicator, FireEffect<20>, 20> {
    FrameLoop::new(
        RecordingDriver::default(),
        RecordingIndicator::default(),
        FireEffect::new(FireConfig::default(), seed),
        &PowerConfig::new(255, 3000),
    )
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

#[test]
fn new_loop_is_idle_with_indicator_off() {
    let frame_loop = fire_loop(1);

    assert_eq!(frame_loop.state(), FrameState::Sleeping);
    assert_eq!(frame_loop.frames(), 0);
    assert_eq!(frame_loop.indicator().levels, vec![false]);
    assert!(frame_loop.driver().frames.is_empty());
}

#[test]
fn render_frame_presents_one_frame() {
    let mut frame_loop = fire_loop(1);
    frame_loop.render_frame();

    assert_eq!(frame_loop.state(), FrameState::Presenting);
    assert_eq!(frame_loop.frames(), 1);
    assert_eq!(frame_loop.driver().frames.len(), 1);
}

#[test]
fn tick_ends_asleep() {
    let mut frame_loop = fire_loop(1).with_frame_interval(Duration::from_millis(1));
    block_on(async {
        frame_loop.tick().await;
        frame_loop.tick().await;
    });

    assert_eq!(frame_loop.state(), FrameState::Sleeping);
    assert_eq!(frame_loop.frames(), 2);
    assert_eq!(frame_loop.driver().frames.len(), 2);
}

#[test]
fn buffer_is_cleared_before_every_frame() {
    let mut frame_loop = FrameLoop::<_, _, _, 4>::new(
        RecordingDriver::default(),
        NoIndicator,
        Accumulator,
        &PowerConfig::new(255, 0),
    );
    for _ in 0..5 {
        frame_loop.render_frame();
    }

    for frame in &frame_loop.driver().frames {
        assert_eq!(frame[0], Rgb::new(10, 0, 0));
    }
}

#[test]
fn write_errors_do_not_stop_the_loop() {
    let mut frame_loop = FrameLoop::<_, _, _, 4>::new(
        FailingDriver::default(),
        NoIndicator,
        Floodlight,
        &PowerConfig::new(255, 0),
    );
    for _ in 0..3 {
        frame_loop.render_frame();
    }

    assert_eq!(frame_loop.frames(), 3);
    assert_eq!(frame_loop.driver().attempts, 3);
}

// -----------------------------------------------------------------------------
// Brightness and power
// -----------------------------------------------------------------------------

#[test]
fn configured_brightness_is_applied() {
    let mut frame_loop = FrameLoop::<_, _, _, 4>::new(
        RecordingDriver::default(),
        RecordingIndicator::default(),
        Floodlight,
        &PowerConfig::new(128, 0),
    );
    frame_loop.render_frame();

    assert_eq!(frame_loop.brightness(), 128);
    assert_eq!(frame_loop.driver().frames[0], [Rgb::new(127, 127, 127); 4]);
    assert_eq!(frame_loop.indicator().current(), Some(false));
}

#[test]
fn over_ceiling_frames_are_dimmed_and_flagged() {
    let mut frame_loop = FrameLoop::<_, _, _, 20>::new(
        RecordingDriver::default(),
        RecordingIndicator::default(),
        Floodlight,
        &PowerConfig::new(255, 3000),
    );
    frame_loop.render_frame();

    // governor picks 174, scale8(255, 174) = 173
    assert_eq!(frame_loop.driver().frames[0], [Rgb::new(173, 173, 173); 20]);
    assert!(frame_loop.is_throttled());
    assert_eq!(frame_loop.indicator().current(), Some(true));
    // the configured brightness itself is untouched
    assert_eq!(frame_loop.brightness(), 255);
}

#[test]
fn unlimited_power_keeps_full_white() {
    let mut frame_loop = FrameLoop::<_, _, _, 20>::new(
        RecordingDriver::default(),
        RecordingIndicator::default(),
        Floodlight,
        &PowerConfig::new(255, 0),
    );
    frame_loop.render_frame();

    assert_eq!(frame_loop.driver().frames[0], [WHITE; 20]);
    assert_eq!(frame_loop.indicator().current(), Some(false));
}

// -----------------------------------------------------------------------------
// Determinism
// -----------------------------------------------------------------------------

#[test]
fn same_seed_same_output() {
    let mut a = fire_loop(99);
    let mut b = fire_loop(99);
    for _ in 0..300 {
        a.render_frame();
        b.render_frame();
    }

    assert_eq!(a.driver().frames, b.driver().frames);
    assert_eq!(a.indicator().levels, b.indicator().levels);
}
