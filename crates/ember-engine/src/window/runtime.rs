use crate::core::App;
use crate::error::RuntimeResult;
use crate::platform::{FrameOutcome, Platform, PlatformWindow};
use crate::time::FrameClock;

use super::config::WindowConfig;
use super::lifecycle::Lifecycle;

/// Drives the window render loop over a [`Platform`] backend.
///
/// Each iteration dispatches pending platform events, checks the window's
/// close flag, then clears, runs the frame callback and presents. The loop
/// has no iteration budget; it stops when the close flag is set, the
/// callback returns [`AppControl::Exit`](crate::core::AppControl), or the
/// callback fails.
///
/// [`run`](Self::run) consumes the runtime: teardown executes exactly once,
/// on every exit path, before any error is handed back to the caller.
pub struct Runtime<P: Platform> {
    platform: P,
    lifecycle: Lifecycle,
}

impl<P: Platform> Runtime<P> {
    /// Wraps an initialized platform.
    pub fn new(platform: P) -> Self {
        let mut lifecycle = Lifecycle::Uninitialized;
        lifecycle.advance(Lifecycle::Initialized);
        Self {
            platform,
            lifecycle,
        }
    }

    /// Opens the window and runs the loop until a close condition is met.
    pub fn run<A>(self, config: &WindowConfig, mut app: A) -> RuntimeResult<()>
    where
        A: App<P::Window>,
    {
        let Self {
            mut platform,
            mut lifecycle,
        } = self;

        let result = Self::drive(&mut platform, &mut lifecycle, config, &mut app);

        // Teardown runs on every exit path, before an error propagates.
        platform.terminate();
        lifecycle.advance(Lifecycle::Closed);

        if let Err(err) = &result {
            log::error!("render loop stopped: {err}");
        }
        result
    }

    fn drive<A>(
        platform: &mut P,
        lifecycle: &mut Lifecycle,
        config: &WindowConfig,
        app: &mut A,
    ) -> RuntimeResult<()>
    where
        A: App<P::Window>,
    {
        let mut window = platform.create_window(config)?;
        lifecycle.advance(Lifecycle::WindowOpen);
        log::info!(
            "window open: \"{}\" ({}x{})",
            config.title,
            config.width,
            config.height
        );

        let mut clock = FrameClock::new();
        lifecycle.advance(Lifecycle::Running);

        loop {
            // Events are dispatched before the close flag is read, so a
            // close delivered this iteration stops the loop without running
            // another frame.
            platform.poll_events(&mut window);
            if window.close_requested() {
                log::info!("close requested, leaving render loop");
                break;
            }

            let time = clock.tick();
            match window.render_frame(config.clear, time, &mut |ctx| app.frame(ctx))? {
                FrameOutcome::Presented | FrameOutcome::Skipped => {}
                FrameOutcome::Exit => {
                    log::info!("frame callback requested exit");
                    break;
                }
            }
        }

        // The window (and its graphics context) is released here, before
        // the platform itself is terminated by the caller.
        drop(window);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use anyhow::Result;

    use crate::core::{App, AppControl, FnApp, FrameCtx};
    use crate::error::{RuntimeError, RuntimeResult};
    use crate::paint::Color;
    use crate::platform::{FrameOutcome, Platform, PlatformWindow};
    use crate::time::FrameTime;

    use super::*;

    #[derive(Debug, Clone, Copy, Eq, PartialEq)]
    enum Call {
        Poll,
        Clear,
        Frame,
        Present,
        WindowDropped,
        Terminate,
    }

    type CallLog = Rc<RefCell<Vec<Call>>>;

    struct MockCanvas;

    struct MockWindow {
        log: CallLog,
        polls: u32,
        /// Close flag flips during the poll after this many polls.
        close_after_polls: Option<u32>,
        close_requested: bool,
        /// 1-based frame ordinals reported as transient surface failures.
        skip_frames: Vec<u32>,
        /// 1-based frame ordinal reported as a fatal device failure.
        fatal_on_frame: Option<u32>,
        frames: u32,
    }

    impl PlatformWindow for MockWindow {
        type Canvas<'c> = MockCanvas;

        fn close_requested(&self) -> bool {
            self.close_requested
        }

        fn render_frame<'a>(
            &mut self,
            _clear: Color,
            time: FrameTime,
            frame: &'a mut dyn FnMut(&mut FrameCtx<'_, MockCanvas>) -> Result<AppControl>,
        ) -> RuntimeResult<FrameOutcome>
        where
            Self: 'a,
        {
            self.frames += 1;
            if self.fatal_on_frame == Some(self.frames) {
                return Err(RuntimeError::Device(anyhow::anyhow!(
                    "surface ran out of memory"
                )));
            }
            if self.skip_frames.contains(&self.frames) {
                return Ok(FrameOutcome::Skipped);
            }

            self.log.borrow_mut().push(Call::Clear);

            let mut canvas = MockCanvas;
            let mut ctx = FrameCtx {
                canvas: &mut canvas,
                time,
            };
            self.log.borrow_mut().push(Call::Frame);

            match frame(&mut ctx) {
                Ok(control) => {
                    self.log.borrow_mut().push(Call::Present);
                    Ok(match control {
                        AppControl::Continue => FrameOutcome::Presented,
                        AppControl::Exit => FrameOutcome::Exit,
                    })
                }
                Err(err) => Err(RuntimeError::Frame(err)),
            }
        }
    }

    impl Drop for MockWindow {
        fn drop(&mut self) {
            self.log.borrow_mut().push(Call::WindowDropped);
        }
    }

    struct MockPlatform {
        log: CallLog,
        fail_window_creation: bool,
        close_after_polls: Option<u32>,
        skip_frames: Vec<u32>,
        fatal_on_frame: Option<u32>,
    }

    impl MockPlatform {
        fn closing_after(log: &CallLog, polls: u32) -> Self {
            Self {
                log: log.clone(),
                fail_window_creation: false,
                close_after_polls: Some(polls),
                skip_frames: Vec::new(),
                fatal_on_frame: None,
            }
        }
    }

    impl Platform for MockPlatform {
        type Window = MockWindow;

        fn create_window(&mut self, _config: &WindowConfig) -> RuntimeResult<MockWindow> {
            if self.fail_window_creation {
                return Err(RuntimeError::WindowCreation(anyhow::anyhow!(
                    "no display available"
                )));
            }
            Ok(MockWindow {
                log: self.log.clone(),
                polls: 0,
                close_after_polls: self.close_after_polls,
                close_requested: false,
                skip_frames: self.skip_frames.clone(),
                fatal_on_frame: self.fatal_on_frame,
                frames: 0,
            })
        }

        fn poll_events(&mut self, window: &mut MockWindow) {
            self.log.borrow_mut().push(Call::Poll);
            window.polls += 1;
            if let Some(n) = window.close_after_polls
                && window.polls > n
            {
                window.close_requested = true;
            }
        }

        fn terminate(self) {
            self.log.borrow_mut().push(Call::Terminate);
        }
    }

    /// Counts invocations; can be scripted to fail or exit on frame N.
    struct CountingApp {
        calls: Rc<Cell<u32>>,
        fail_on: Option<u32>,
        exit_on: Option<u32>,
    }

    impl CountingApp {
        fn new(calls: &Rc<Cell<u32>>) -> Self {
            Self {
                calls: calls.clone(),
                fail_on: None,
                exit_on: None,
            }
        }
    }

    impl App<MockWindow> for CountingApp {
        fn frame(&mut self, _ctx: &mut FrameCtx<'_, MockCanvas>) -> Result<AppControl> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if self.fail_on == Some(n) {
                anyhow::bail!("frame {n} failed");
            }
            if self.exit_on == Some(n) {
                return Ok(AppControl::Exit);
            }
            Ok(AppControl::Continue)
        }
    }

    fn count(log: &CallLog, call: Call) -> usize {
        log.borrow().iter().filter(|&&c| c == call).count()
    }

    // ── clean shutdown ────────────────────────────────────────────────────

    #[test]
    fn runs_three_frames_then_exits_cleanly() {
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let runtime = Runtime::new(MockPlatform::closing_after(&log, 3));
        let result = runtime.run(&WindowConfig::default(), CountingApp::new(&calls));

        assert!(result.is_ok());
        assert_eq!(calls.get(), 3);

        let iteration = [Call::Poll, Call::Clear, Call::Frame, Call::Present];
        let mut expected: Vec<Call> = Vec::new();
        for _ in 0..3 {
            expected.extend_from_slice(&iteration);
        }
        expected.extend_from_slice(&[Call::Poll, Call::WindowDropped, Call::Terminate]);
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn teardown_happens_exactly_once() {
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let runtime = Runtime::new(MockPlatform::closing_after(&log, 1));
        runtime
            .run(&WindowConfig::default(), CountingApp::new(&calls))
            .unwrap();

        assert_eq!(count(&log, Call::Terminate), 1);
        assert_eq!(count(&log, Call::WindowDropped), 1);
    }

    #[test]
    fn poll_runs_before_the_close_check() {
        // Close flag flips on the very first poll: the callback never runs.
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let runtime = Runtime::new(MockPlatform::closing_after(&log, 0));
        let result = runtime.run(&WindowConfig::default(), CountingApp::new(&calls));

        assert!(result.is_ok());
        assert_eq!(calls.get(), 0);
        assert_eq!(
            *log.borrow(),
            vec![Call::Poll, Call::WindowDropped, Call::Terminate]
        );
    }

    #[test]
    fn closure_adapter_drives_the_loop() {
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        let runtime = Runtime::new(MockPlatform::closing_after(&log, 2));
        let app = FnApp(
            move |_ctx: &mut FrameCtx<'_, MockCanvas>| -> Result<AppControl> {
                counter.set(counter.get() + 1);
                Ok(AppControl::Continue)
            },
        );
        let result = runtime.run(&WindowConfig::default(), app);

        assert!(result.is_ok());
        assert_eq!(calls.get(), 2);
        assert_eq!(count(&log, Call::Present), 2);
    }

    // ── caller-driven exit ────────────────────────────────────────────────

    #[test]
    fn exit_control_presents_the_final_frame() {
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let runtime = Runtime::new(MockPlatform::closing_after(&log, 100));
        let mut app = CountingApp::new(&calls);
        app.exit_on = Some(1);
        let result = runtime.run(&WindowConfig::default(), app);

        assert!(result.is_ok());
        assert_eq!(calls.get(), 1);
        assert_eq!(
            *log.borrow(),
            vec![
                Call::Poll,
                Call::Clear,
                Call::Frame,
                Call::Present,
                Call::WindowDropped,
                Call::Terminate,
            ]
        );
    }

    // ── failure paths ─────────────────────────────────────────────────────

    #[test]
    fn teardown_runs_before_a_frame_error_surfaces() {
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let runtime = Runtime::new(MockPlatform::closing_after(&log, 100));
        let mut app = CountingApp::new(&calls);
        app.fail_on = Some(2);
        let result = runtime.run(&WindowConfig::default(), app);

        assert!(matches!(result, Err(RuntimeError::Frame(_))));
        assert_eq!(calls.get(), 2);

        // The failed frame is not presented; window and platform are
        // released before run() returns the error.
        let recorded = log.borrow();
        assert_eq!(
            recorded[recorded.len() - 3..],
            [Call::Frame, Call::WindowDropped, Call::Terminate]
        );
        assert_eq!(count(&log, Call::Present), 1);
    }

    #[test]
    fn window_creation_failure_never_enters_the_loop() {
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let platform = MockPlatform {
            log: log.clone(),
            fail_window_creation: true,
            close_after_polls: None,
            skip_frames: Vec::new(),
            fatal_on_frame: None,
        };
        let result = Runtime::new(platform).run(&WindowConfig::default(), CountingApp::new(&calls));

        assert!(matches!(result, Err(RuntimeError::WindowCreation(_))));
        assert_eq!(calls.get(), 0);
        // Platform teardown still runs, once.
        assert_eq!(*log.borrow(), vec![Call::Terminate]);
    }

    #[test]
    fn teardown_runs_before_a_device_error_surfaces() {
        // Fatal surface loss on the first frame: the callback never runs,
        // but window and platform are still released before the error.
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let platform = MockPlatform {
            log: log.clone(),
            fail_window_creation: false,
            close_after_polls: Some(100),
            skip_frames: Vec::new(),
            fatal_on_frame: Some(1),
        };
        let result = Runtime::new(platform).run(&WindowConfig::default(), CountingApp::new(&calls));

        assert!(matches!(result, Err(RuntimeError::Device(_))));
        assert_eq!(calls.get(), 0);
        assert_eq!(
            *log.borrow(),
            vec![Call::Poll, Call::WindowDropped, Call::Terminate]
        );
    }

    // ── transient surface loss ────────────────────────────────────────────

    #[test]
    fn skipped_frames_do_not_reach_the_callback() {
        let log: CallLog = CallLog::default();
        let calls = Rc::new(Cell::new(0));

        let platform = MockPlatform {
            log: log.clone(),
            fail_window_creation: false,
            close_after_polls: Some(3),
            skip_frames: vec![2],
            fatal_on_frame: None,
        };
        let result = Runtime::new(platform).run(&WindowConfig::default(), CountingApp::new(&calls));

        assert!(result.is_ok());
        // Three iterations ran, the second one skipped.
        assert_eq!(calls.get(), 2);
        assert_eq!(count(&log, Call::Poll), 4);
        assert_eq!(count(&log, Call::Present), 2);
    }
}
