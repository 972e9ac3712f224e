use std::cell::RefCell;
use std::rc::Rc;

use wave_canvas::{
    Color, FixedRateScheduler, FrameScheduler, Result, Surface, WaveCanvas, WaveCanvasConfig,
    WaveLayer, WavePath,
};

/// Scheduler that records every request and cancellation.
#[derive(Debug, Default)]
struct Log {
    requested: Vec<u32>,
    cancelled: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
struct MockScheduler {
    log: Rc<RefCell<Log>>,
    next: u32,
}

impl FrameScheduler for MockScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Result<u32> {
        self.next += 1;
        self.log.borrow_mut().requested.push(self.next);
        Ok(self.next)
    }

    fn cancel_frame(&mut self, handle: u32) -> Result<()> {
        self.log.borrow_mut().cancelled.push(handle);
        Ok(())
    }
}

/// Surface that counts full repaints.
#[derive(Debug, Clone, Default)]
struct CountingSurface {
    size: (u32, u32),
    resizes: usize,
    frames: Rc<RefCell<usize>>,
}

impl Surface for CountingSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.size = (width, height);
        self.resizes += 1;
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self) -> Result<()> {
        *self.frames.borrow_mut() += 1;
        Ok(())
    }

    fn fill(&mut self, _: Color) -> Result<()> {
        Ok(())
    }

    fn fill_path(&mut self, _: &WavePath, _: Color, _: f64) -> Result<()> {
        Ok(())
    }
}

fn config() -> WaveCanvasConfig {
    WaveCanvasConfig::new(
        200,
        100,
        vec![
            WaveLayer::new("#8B5CF6".parse().unwrap(), 40.0).with_speed(0.5),
            WaveLayer::new("#A78BFA".parse().unwrap(), 60.0).with_amplitude(20.0),
        ],
    )
}

#[test]
fn test_unmount_cancels_once_and_stops_drawing() {
    let scheduler = MockScheduler::default();
    let log = scheduler.log.clone();
    let surface = CountingSurface::default();
    let frames = surface.frames.clone();

    let mut canvas = WaveCanvas::new(surface, scheduler, config());
    canvas.start().unwrap();

    assert!(canvas.on_frame(1000.0).unwrap());
    assert!(canvas.on_frame(1016.0).unwrap());
    assert_eq!(*frames.borrow(), 2);

    canvas.stop().unwrap();

    assert_eq!(log.borrow().cancelled, vec![3]);

    // a late tick from the host must not draw
    assert!(!canvas.on_frame(1033.0).unwrap());
    assert_eq!(*frames.borrow(), 2);

    canvas.stop().unwrap();
    drop(canvas);

    assert_eq!(log.borrow().cancelled.len(), 1);
    assert_eq!(log.borrow().requested.len(), 3);
}

#[test]
fn test_drop_cancels_pending_frame() {
    let scheduler = MockScheduler::default();
    let log = scheduler.log.clone();

    {
        let mut canvas = WaveCanvas::new(CountingSurface::default(), scheduler, config());
        canvas.start().unwrap();
    }

    assert_eq!(log.borrow().cancelled, vec![1]);
}

#[test]
fn test_start_is_idempotent() {
    let scheduler = MockScheduler::default();
    let log = scheduler.log.clone();

    let mut canvas = WaveCanvas::new(CountingSurface::default(), scheduler, config());
    canvas.start().unwrap();
    canvas.start().unwrap();

    assert_eq!(canvas.surface().resizes, 1);
    assert_eq!(log.borrow().requested.len(), 1);
}

#[test]
fn test_reconfigure_cancels_then_restarts() {
    let scheduler = MockScheduler::default();
    let log = scheduler.log.clone();

    let mut canvas = WaveCanvas::new(CountingSurface::default(), scheduler, config());
    canvas.start().unwrap();
    canvas.on_frame(10.0).unwrap();

    let mut next = config();
    next.height = 300;
    canvas.set_config(next).unwrap();

    assert_eq!(log.borrow().cancelled, vec![2]);
    assert_eq!(log.borrow().requested, vec![1, 2, 3]);
    assert_eq!(canvas.surface().dimensions(), (200, 300));
    assert_eq!(canvas.state().unwrap().start_time(), None);

    canvas.on_frame(500.0).unwrap();
    assert_eq!(canvas.state().unwrap().start_time(), Some(500.0));
}

#[test]
fn test_canvases_are_independent() {
    let frames_a = Rc::new(RefCell::new(0));
    let frames_b = Rc::new(RefCell::new(0));

    let mut a = WaveCanvas::new(
        CountingSurface {
            frames: frames_a.clone(),
            ..Default::default()
        },
        MockScheduler::default(),
        config(),
    );
    let mut b = WaveCanvas::new(
        CountingSurface {
            frames: frames_b.clone(),
            ..Default::default()
        },
        MockScheduler::default(),
        config(),
    );

    a.start().unwrap();
    b.start().unwrap();
    a.on_frame(0.0).unwrap();
    b.stop().unwrap();
    a.on_frame(16.0).unwrap();

    assert_eq!(*frames_a.borrow(), 2);
    assert_eq!(*frames_b.borrow(), 0);
    assert!(a.is_running());
    assert!(!b.is_running());
}

#[test]
fn test_fixed_rate_loop_on_simulated_clock() {
    let mut canvas = WaveCanvas::new(
        CountingSurface::default(),
        FixedRateScheduler::new(50.0),
        config(),
    );
    canvas.start().unwrap();

    let mut drawn = Vec::new();
    let mut now = 0.0;

    while drawn.len() < 4 {
        if canvas.scheduler_mut().poll(now) && canvas.on_frame(now).unwrap() {
            drawn.push(now);
        }
        now += 5.0;
    }

    assert_eq!(drawn, vec![0.0, 20.0, 40.0, 60.0]);

    canvas.stop().unwrap();
    assert_eq!(canvas.scheduler().next_due(), None);
    assert!(!canvas.scheduler_mut().poll(1000.0));
}

#[test]
fn test_fixed_rate_restart_draws_without_waiting() {
    let mut canvas = WaveCanvas::new(
        CountingSurface::default(),
        FixedRateScheduler::with_interval(20.0),
        config(),
    );
    canvas.start().unwrap();

    assert!(canvas.scheduler_mut().poll(0.0));
    assert!(canvas.on_frame(0.0).unwrap());
    assert!(!canvas.scheduler_mut().poll(5.0));

    let mut next = config();
    next.width = 320;
    canvas.set_config(next).unwrap();

    assert_eq!(canvas.scheduler().next_due(), Some(5.0));
    assert!(canvas.scheduler_mut().poll(5.0));
    assert!(canvas.on_frame(5.0).unwrap());

    canvas.stop().unwrap();
    assert!(!canvas.scheduler_mut().poll(12.0));
    canvas.start().unwrap();

    assert_eq!(canvas.scheduler().next_due(), Some(12.0));
}
