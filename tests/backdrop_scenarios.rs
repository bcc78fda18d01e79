//! End-to-end paint loop scenarios driven through a recording renderer

use touch_tint::app::{AppEvent, Dispatch, FrameLoop, PaintOrigin, RenderError, Renderer, Size};
use touch_tint::sim::{ClearColor, TouchPhase};

/// Drawing context standing in for a window surface
#[derive(Debug, Default)]
struct FakeSurface {
    presented: usize,
}

#[derive(Debug, PartialEq)]
enum Call {
    Start,
    Paint(Size, ClearColor),
    Stop,
}

#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<Call>,
    fail_start: bool,
    fail_paint: Option<fn() -> RenderError>,
}

impl RecordingRenderer {
    fn paints(&self) -> Vec<ClearColor> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Paint(_, color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    fn count(&self, wanted: fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| wanted(call)).count()
    }
}

impl Renderer for RecordingRenderer {
    type Context = FakeSurface;

    fn start(&mut self, _ctx: &mut FakeSurface) -> Result<(), RenderError> {
        self.calls.push(Call::Start);
        if self.fail_start {
            return Err(RenderError::Program("entry point missing".to_string()));
        }
        Ok(())
    }

    fn paint(
        &mut self,
        _ctx: &mut FakeSurface,
        size: Size,
        clear: ClearColor,
    ) -> Result<(), RenderError> {
        self.calls.push(Call::Paint(size, clear));
        match self.fail_paint {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }

    fn publish(&mut self, ctx: &mut FakeSurface) {
        ctx.presented += 1;
    }

    fn stop(&mut self, _ctx: &mut FakeSurface) {
        self.calls.push(Call::Stop);
    }
}

fn out_of_memory() -> RenderError {
    RenderError::Surface(wgpu::SurfaceError::OutOfMemory)
}

fn timed_out() -> RenderError {
    RenderError::Surface(wgpu::SurfaceError::Timeout)
}

fn visible_loop() -> FrameLoop<RecordingRenderer> {
    let mut frame_loop = FrameLoop::new(RecordingRenderer::default());
    frame_loop.handle(AppEvent::Resized(Size::new(720, 1280, 2.0)));
    assert_eq!(
        frame_loop.handle(AppEvent::Visible(Some(FakeSurface::default()))),
        Dispatch::SchedulePaint
    );
    frame_loop
}

fn paint(frame_loop: &mut FrameLoop<RecordingRenderer>) -> Dispatch {
    frame_loop.handle(AppEvent::Paint(PaintOrigin::Scheduled))
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_touch_then_release_trace() {
    let mut frame_loop = visible_loop();
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));

    let mut trace = Vec::new();
    for _ in 0..5 {
        assert_eq!(paint(&mut frame_loop), Dispatch::SchedulePaint);
        trace.push(frame_loop.backdrop().green_level());
    }

    frame_loop.handle(AppEvent::Touch(TouchPhase::End));
    paint(&mut frame_loop);
    trace.push(frame_loop.backdrop().green_level());

    for (actual, expected) in trace.iter().zip([0.01, 0.02, 0.03, 0.04, 0.05, 0.0]) {
        assert_close(*actual, expected);
    }

    let paints = frame_loop.renderer().paints();
    assert_eq!(paints.len(), 6);
    assert_close(paints[4].g, 0.05);
    assert_eq!(paints[5], ClearColor::RED);
}

#[test]
fn test_green_wraps_once_over_101_frames() {
    let mut frame_loop = visible_loop();
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));

    let mut wraps = 0;
    for n in 1..=101u32 {
        paint(&mut frame_loop);
        let level = frame_loop.backdrop().green_level();
        if level == 0.0 {
            wraps += 1;
        } else {
            assert_close(level, n as f32 * 0.01);
        }
        if n == 100 {
            assert_eq!(level, 1.0);
        }
    }

    assert_eq!(wraps, 1);
    assert_eq!(frame_loop.backdrop().green_level(), 0.0);
    assert_eq!(frame_loop.renderer().paints().last(), Some(&ClearColor::green(0.0)));
}

#[test]
fn test_green_channel_matches_level_while_touching() {
    let mut frame_loop = visible_loop();
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));

    for n in 1..=250u32 {
        // moving contacts keep the flag set
        frame_loop.handle(AppEvent::Touch(TouchPhase::Move));
        paint(&mut frame_loop);
        let color = *frame_loop.renderer().paints().last().unwrap();
        assert_eq!(color.g, frame_loop.backdrop().green_level());
        assert_eq!((color.r, color.b, color.a), (0.0, 0.0, 1.0));

        let steps = n % 101;
        assert_close(color.g, steps as f32 * 0.01);
    }
}

#[test]
fn test_any_sequence_ending_in_release_paints_red() {
    let sequences: [&[TouchPhase]; 3] = [
        &[TouchPhase::Begin, TouchPhase::End],
        &[TouchPhase::Begin, TouchPhase::Move, TouchPhase::Move, TouchPhase::End],
        &[TouchPhase::End],
    ];

    for sequence in sequences {
        let mut frame_loop = visible_loop();
        for (i, phase) in sequence.iter().enumerate() {
            frame_loop.handle(AppEvent::Touch(*phase));
            if i % 2 == 0 {
                paint(&mut frame_loop);
            }
        }

        assert!(!frame_loop.backdrop().is_touching());
        paint(&mut frame_loop);
        assert_eq!(frame_loop.renderer().paints().last(), Some(&ClearColor::RED));
        assert_eq!(frame_loop.backdrop().green_level(), 0.0);
    }
}

#[test]
fn test_skipped_paints_leave_state_alone() {
    let mut frame_loop = FrameLoop::new(RecordingRenderer::default());
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));

    // No context yet
    assert_eq!(paint(&mut frame_loop), Dispatch::Idle);

    frame_loop.handle(AppEvent::Visible(Some(FakeSurface::default())));
    assert_eq!(
        frame_loop.handle(AppEvent::Paint(PaintOrigin::External)),
        Dispatch::Idle
    );

    assert!(frame_loop.renderer().paints().is_empty());
    assert_eq!(frame_loop.backdrop().green_level(), 0.0);
    assert_eq!(frame_loop.frames_painted(), 0);
}

#[test]
fn test_paint_uses_latest_size_and_publishes() {
    let mut frame_loop = visible_loop();
    paint(&mut frame_loop);
    frame_loop.handle(AppEvent::Resized(Size::new(1280, 720, 2.0)));
    paint(&mut frame_loop);

    let sizes: Vec<Size> = frame_loop
        .renderer()
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::Paint(size, _) => Some(*size),
            _ => None,
        })
        .collect();
    assert_eq!(sizes, vec![Size::new(720, 1280, 2.0), Size::new(1280, 720, 2.0)]);
    assert_eq!(frame_loop.context().map(|c| c.presented), Some(2));
}

#[test]
fn test_lifecycle_pairs_start_and_stop() {
    let mut frame_loop = visible_loop();
    paint(&mut frame_loop);
    frame_loop.handle(AppEvent::Hidden);

    assert_eq!(paint(&mut frame_loop), Dispatch::Idle);

    frame_loop.handle(AppEvent::Visible(Some(FakeSurface::default())));
    paint(&mut frame_loop);
    frame_loop.handle(AppEvent::Hidden);

    let calls = &frame_loop.renderer().calls;
    assert_eq!(frame_loop.renderer().count(|c| matches!(c, Call::Start)), 2);
    assert_eq!(frame_loop.renderer().count(|c| matches!(c, Call::Stop)), 2);

    // Every start comes before the paints that follow it
    assert!(matches!(calls[0], Call::Start));
    assert!(matches!(calls[1], Call::Paint(..)));
    assert!(matches!(calls[2], Call::Stop));
    assert!(matches!(calls[3], Call::Start));
    assert!(matches!(calls[4], Call::Paint(..)));
    assert!(matches!(calls[5], Call::Stop));
}

#[test]
fn test_failed_start_skips_paints_until_next_visible() {
    let renderer = RecordingRenderer {
        fail_start: true,
        ..Default::default()
    };
    let mut frame_loop = FrameLoop::new(renderer);

    assert_eq!(
        frame_loop.handle(AppEvent::Visible(Some(FakeSurface::default()))),
        Dispatch::Idle
    );
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));
    assert_eq!(paint(&mut frame_loop), Dispatch::Idle);
    assert!(frame_loop.renderer().paints().is_empty());
    assert_eq!(frame_loop.backdrop().green_level(), 0.0);

    frame_loop.handle(AppEvent::Hidden);
    assert_eq!(frame_loop.renderer().count(|c| matches!(c, Call::Stop)), 1);
}

#[test]
fn test_fatal_paint_error_exits() {
    let renderer = RecordingRenderer {
        fail_paint: Some(out_of_memory),
        ..Default::default()
    };
    let mut frame_loop = FrameLoop::new(renderer);
    frame_loop.handle(AppEvent::Resized(Size::new(720, 1280, 2.0)));
    frame_loop.handle(AppEvent::Visible(Some(FakeSurface::default())));

    assert_eq!(paint(&mut frame_loop), Dispatch::Exit);
    assert_eq!(frame_loop.context().map(|c| c.presented), Some(0));
}

#[test]
fn test_recoverable_paint_error_keeps_looping() {
    let renderer = RecordingRenderer {
        fail_paint: Some(timed_out),
        ..Default::default()
    };
    let mut frame_loop = FrameLoop::new(renderer);
    frame_loop.handle(AppEvent::Resized(Size::new(720, 1280, 2.0)));
    frame_loop.handle(AppEvent::Visible(Some(FakeSurface::default())));
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));

    assert_eq!(paint(&mut frame_loop), Dispatch::SchedulePaint);
    assert_eq!(frame_loop.frames_painted(), 0);
    assert_eq!(frame_loop.context().map(|c| c.presented), Some(0));

    // The dropped frame still counts as a step of the animation
    assert_close(frame_loop.backdrop().green_level(), 0.01);
}

#[test]
fn test_minimized_window_stops_painting() {
    let mut frame_loop = visible_loop();
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));
    paint(&mut frame_loop);
    frame_loop.handle(AppEvent::Resized(Size::new(0, 0, 2.0)));

    for _ in 0..50 {
        assert_eq!(paint(&mut frame_loop), Dispatch::Idle);
    }

    assert_eq!(frame_loop.renderer().paints().len(), 1);
    assert_eq!(frame_loop.frames_painted(), 1);
    assert_close(frame_loop.backdrop().green_level(), 0.01);
}

#[test]
fn test_restored_window_resumes_painting() {
    let mut frame_loop = visible_loop();
    frame_loop.handle(AppEvent::Touch(TouchPhase::Begin));
    frame_loop.handle(AppEvent::Resized(Size::new(0, 0, 2.0)));
    assert_eq!(paint(&mut frame_loop), Dispatch::Idle);

    assert_eq!(
        frame_loop.handle(AppEvent::Resized(Size::new(720, 1280, 2.0))),
        Dispatch::SchedulePaint
    );
    assert_eq!(paint(&mut frame_loop), Dispatch::SchedulePaint);
    assert_close(frame_loop.backdrop().green_level(), 0.01);

    // A resize while the next paint is queued keeps a single paint chain
    assert_eq!(
        frame_loop.handle(AppEvent::Resized(Size::new(1280, 720, 2.0))),
        Dispatch::Idle
    );
}
